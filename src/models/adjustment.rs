use serde::{Deserialize, Serialize};

use crate::models::activity::TimeSlot;
use crate::models::settings::BandWeights;

/// Post-run feedback the user gives about a published week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedback {
    #[serde(default)]
    pub too_many_morning_activities: bool,
    #[serde(default)]
    pub need_more_rest_days: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Reschedule,
    FrequencyAdjustment,
    TimingAdjustment,
    RestDayAdjustment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAdjustment {
    pub kind: AdjustmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_id: Option<String>,
    pub suggestion: String,
    pub priority: AdjustmentPriority,
}

/// Per-band energy and sleep-recovery readings, each in [0,1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessPatterns {
    pub energy: BandWeights,
    pub sleep: BandWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotTimingScore {
    pub time_slot: TimeSlot,
    pub score: f64,
    pub energy_score: f64,
    pub sleep_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTimingAdvice {
    pub user_id: String,
    pub optimal_slots: Vec<SlotTimingScore>,
    pub recommendation: TimeSlot,
    pub reasoning: String,
}
