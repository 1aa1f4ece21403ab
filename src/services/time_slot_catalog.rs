use chrono::NaiveTime;

use crate::models::activity::TimeSlot;
use crate::models::settings::TimeSlotTable;
use crate::services::schedule_utils;

/// Lookup of the clock range behind each time band.
#[derive(Debug, Clone)]
pub struct TimeSlotCatalog {
    table: TimeSlotTable,
}

impl TimeSlotCatalog {
    pub fn new(table: TimeSlotTable) -> Self {
        Self { table }
    }

    pub fn range_of(&self, slot: TimeSlot) -> (NaiveTime, NaiveTime) {
        let range = self.table.range_of(slot);
        (range.start, range.end)
    }

    pub fn duration_minutes(&self, start: NaiveTime, end: NaiveTime) -> i64 {
        schedule_utils::duration_minutes(start, end)
    }

    pub fn band_minutes(&self, slot: TimeSlot) -> i64 {
        let (start, end) = self.range_of(slot);
        self.duration_minutes(start, end)
    }

    /// Bands with their ranges, in day order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeSlot, NaiveTime, NaiveTime)> + '_ {
        TimeSlot::ALL.into_iter().map(move |slot| {
            let (start, end) = self.range_of(slot);
            (slot, start, end)
        })
    }
}

impl Default for TimeSlotCatalog {
    fn default() -> Self {
        Self::new(TimeSlotTable::default())
    }
}
