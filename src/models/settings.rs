use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::activity::{ActivityType, TimeSlot};

/// Immutable tables and weights injected into every optimizer component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerSettings {
    pub time_slots: TimeSlotTable,
    pub scoring: ScoringWeights,
    /// Upper bound on placement attempts per constraint; excess frequency becomes a conflict.
    pub max_occurrences_per_constraint: u32,
    pub spacing_mode: SpacingMode,
    pub adherence: AdherenceSettings,
    pub recommendations: RecommendationSettings,
    pub titles: ActivityTitles,
    pub workout_timing: WorkoutTimingSettings,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            time_slots: TimeSlotTable::default(),
            scoring: ScoringWeights::default(),
            max_occurrences_per_constraint: 7 * TimeSlot::ALL.len() as u32,
            spacing_mode: SpacingMode::default(),
            adherence: AdherenceSettings::default(),
            recommendations: RecommendationSettings::default(),
            titles: ActivityTitles::default(),
            workout_timing: WorkoutTimingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BandRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BandRange {
    fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start: clock(start_hour),
            end: clock(end_hour),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeSlotTable {
    pub early_morning: BandRange,
    pub morning: BandRange,
    pub afternoon: BandRange,
    pub evening: BandRange,
    pub night: BandRange,
}

impl TimeSlotTable {
    pub fn range_of(&self, slot: TimeSlot) -> BandRange {
        match slot {
            TimeSlot::EarlyMorning => self.early_morning,
            TimeSlot::Morning => self.morning,
            TimeSlot::Afternoon => self.afternoon,
            TimeSlot::Evening => self.evening,
            TimeSlot::Night => self.night,
        }
    }
}

impl Default for TimeSlotTable {
    fn default() -> Self {
        Self {
            early_morning: BandRange::new(5, 8),
            morning: BandRange::new(8, 12),
            afternoon: BandRange::new(12, 17),
            evening: BandRange::new(17, 21),
            night: BandRange::new(21, 5),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringWeights {
    pub base: f64,
    pub preferred_band_bonus: f64,
    pub weekday_bonus: f64,
    pub early_morning_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            preferred_band_bonus: 0.3,
            weekday_bonus: 0.2,
            early_morning_penalty: 0.1,
        }
    }
}

/// Which slots the minimum-spacing rule is measured against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpacingMode {
    /// Candidate against the other open candidates of the same constraint.
    #[default]
    CandidatePeers,
    /// Candidate against occurrences of the same constraint already placed this run.
    PlacedOccurrences,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AdherenceSettings {
    /// Added per occurrence that landed in one of the constraint's preferred bands.
    pub preferred_band_bonus: f64,
}

impl Default for AdherenceSettings {
    fn default() -> Self {
        Self {
            preferred_band_bonus: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendationSettings {
    pub high_priority_threshold: u8,
    pub min_workout_days: usize,
    pub min_morning_workouts: usize,
    pub min_meals: usize,
    pub low_adherence_threshold: f64,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            high_priority_threshold: 4,
            min_workout_days: 3,
            min_morning_workouts: 2,
            min_meals: 3,
            low_adherence_threshold: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityTitles {
    pub workout: String,
    pub meal: String,
    pub habit: String,
    pub mindset: String,
    pub sleep: String,
}

impl ActivityTitles {
    pub fn title_for(&self, activity_type: ActivityType) -> &str {
        match activity_type {
            ActivityType::Workout => &self.workout,
            ActivityType::Meal => &self.meal,
            ActivityType::Habit => &self.habit,
            ActivityType::Mindset => &self.mindset,
            ActivityType::Sleep => &self.sleep,
        }
    }
}

impl Default for ActivityTitles {
    fn default() -> Self {
        Self {
            workout: "Workout Session".to_string(),
            meal: "Meal Time".to_string(),
            habit: "Habit Check-in".to_string(),
            mindset: "Mindset Practice".to_string(),
            sleep: "Sleep Preparation".to_string(),
        }
    }
}

/// A value per time band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BandWeights {
    pub early_morning: f64,
    pub morning: f64,
    pub afternoon: f64,
    pub evening: f64,
    pub night: f64,
}

impl BandWeights {
    pub fn get(&self, slot: TimeSlot) -> f64 {
        match slot {
            TimeSlot::EarlyMorning => self.early_morning,
            TimeSlot::Morning => self.morning,
            TimeSlot::Afternoon => self.afternoon,
            TimeSlot::Evening => self.evening,
            TimeSlot::Night => self.night,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkoutTimingSettings {
    pub energy_weight: f64,
    pub sleep_weight: f64,
    pub default_energy: BandWeights,
    pub default_sleep: BandWeights,
}

impl Default for WorkoutTimingSettings {
    fn default() -> Self {
        Self {
            energy_weight: 0.7,
            sleep_weight: 0.3,
            default_energy: BandWeights {
                early_morning: 0.6,
                morning: 0.8,
                afternoon: 0.7,
                evening: 0.5,
                night: 0.3,
            },
            default_sleep: BandWeights {
                early_morning: 0.7,
                morning: 0.9,
                afternoon: 0.6,
                evening: 0.4,
                night: 0.2,
            },
        }
    }
}

fn clock(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
}
