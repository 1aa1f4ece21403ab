use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::models::schedule::{AvailableSlot, ScheduledActivity, UserPreferences};
use crate::services::schedule_utils;
use crate::services::slot_scorer::SlotScorer;
use crate::services::time_slot_catalog::TimeSlotCatalog;

/// Builds the open (date, band) candidates of a week.
pub struct AvailabilityGenerator<'a> {
    catalog: &'a TimeSlotCatalog,
    scorer: &'a SlotScorer,
}

impl<'a> AvailabilityGenerator<'a> {
    pub fn new(catalog: &'a TimeSlotCatalog, scorer: &'a SlotScorer) -> Self {
        Self { catalog, scorer }
    }

    /// Rest days contribute no slots at all. A band is offered only when no fixed
    /// activity on the same date overlaps it.
    pub fn generate(
        &self,
        week_start: NaiveDate,
        preferences: &UserPreferences,
        existing_activities: &[ScheduledActivity],
    ) -> Vec<AvailableSlot> {
        let mut slots = Vec::new();

        for date in schedule_utils::week_dates(week_start) {
            let day_of_week = schedule_utils::iso_weekday(date);
            if preferences.is_rest_day(day_of_week) {
                debug!(target: "app::schedule", %date, day_of_week, "skipping rest day");
                continue;
            }

            for (time_slot, start_time, end_time) in self.catalog.iter() {
                if has_conflict(date, start_time, end_time, existing_activities) {
                    continue;
                }

                slots.push(AvailableSlot {
                    date,
                    day_of_week,
                    time_slot,
                    start_time,
                    end_time,
                    available_duration: self.catalog.duration_minutes(start_time, end_time),
                    score: self.scorer.score(time_slot, day_of_week, preferences),
                });
            }
        }

        slots
    }
}

fn has_conflict(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    existing_activities: &[ScheduledActivity],
) -> bool {
    let band = schedule_utils::minute_range(start_time, end_time);
    existing_activities.iter().any(|activity| {
        activity.scheduled_date == date && schedule_utils::overlaps(band, activity.minute_range())
    })
}
