use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::activity::{ActivityType, TimeSlot};
use crate::services::schedule_utils;

/// A recurring requirement produced by an upstream planner, e.g. "workout 3x/week, mornings".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConstraint {
    pub id: String,
    pub activity_type: ActivityType,
    pub preferred_time_slots: Vec<TimeSlot>,
    /// ISO weekday numbers, 1 = Monday .. 7 = Sunday.
    pub preferred_days: Vec<u32>,
    pub duration_minutes: i64,
    pub frequency_per_week: u32,
    /// 1-5, higher is more important.
    pub priority: u8,
    #[serde(default)]
    pub must_have_spacing_hours: i64,
    #[serde(default = "default_flexible_timing")]
    pub flexible_timing: bool,
}

impl ScheduleConstraint {
    pub fn prefers_slot(&self, slot: TimeSlot) -> bool {
        self.preferred_time_slots.contains(&slot)
    }

    pub fn prefers_day(&self, day_of_week: u32) -> bool {
        self.preferred_days.contains(&day_of_week)
    }
}

fn default_flexible_timing() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub user_id: String,
    pub wake_up_time: NaiveTime,
    pub bed_time: NaiveTime,
    pub work_start_time: NaiveTime,
    pub work_end_time: NaiveTime,
    pub preferred_workout_time: TimeSlot,
    /// Keyed by meal name (breakfast, lunch, dinner).
    #[serde(default)]
    pub preferred_meal_times: BTreeMap<String, NaiveTime>,
    /// ISO weekdays on which no slots are offered.
    #[serde(default)]
    pub rest_days: Vec<u32>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl UserPreferences {
    pub fn is_rest_day(&self, day_of_week: u32) -> bool {
        self.rest_days.contains(&day_of_week)
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// One concrete, dated and timed occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActivity {
    pub id: String,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scheduled_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
    pub constraint_id: String,
    pub priority: u8,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    pub day_of_week: u32,
}

impl ScheduledActivity {
    /// Minutes from midnight of `scheduled_date`; the end runs past 1440 when it wraps.
    pub fn minute_range(&self) -> (i64, i64) {
        if self.duration_minutes > 0 {
            let start = schedule_utils::minutes_from_midnight(self.start_time);
            (start, start + self.duration_minutes)
        } else {
            schedule_utils::minute_range(self.start_time, self.end_time)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    NoSuitableSlot,
    FrequencyCapExceeded,
}

impl ConflictReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictReason::NoSuitableSlot => "no_suitable_slot",
            ConflictReason::FrequencyCapExceeded => "frequency_cap_exceeded",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ConflictReason::NoSuitableSlot => "No suitable time slot available",
            ConflictReason::FrequencyCapExceeded => {
                "Requested frequency exceeds the weekly occurrence cap"
            }
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unmet constraint-frequency requirement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub constraint_id: String,
    pub activity_type: ActivityType,
    pub reason: ConflictReason,
    pub message: String,
    pub priority: u8,
    pub requested_occurrences: u32,
    pub unmet_occurrences: u32,
}

/// Candidate (date, band) pairing with its capacity, prior to assignment.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub date: NaiveDate,
    pub day_of_week: u32,
    pub time_slot: TimeSlot,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available_duration: i64,
    pub score: f64,
}

impl AvailableSlot {
    pub fn minute_range(&self) -> (i64, i64) {
        schedule_utils::minute_range(self.start_time, self.end_time)
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

/// Inputs of a single optimizer run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub week_start: NaiveDate,
    #[serde(default)]
    pub constraints: Vec<ScheduleConstraint>,
    pub preferences: UserPreferences,
    #[serde(default)]
    pub existing_activities: Vec<ScheduledActivity>,
}

/// Immutable result bundle of one optimizer run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptimization {
    pub user_id: String,
    pub week_start: NaiveDate,
    pub scheduled_activities: Vec<ScheduledActivity>,
    pub conflicts: Vec<Conflict>,
    pub recommendations: Vec<String>,
    pub adherence_score: f64,
}

impl ScheduleOptimization {
    pub fn activities_for<'a>(
        &'a self,
        constraint_id: &'a str,
    ) -> impl Iterator<Item = &'a ScheduledActivity> + 'a {
        self.scheduled_activities
            .iter()
            .filter(move |activity| activity.constraint_id == constraint_id)
    }
}
