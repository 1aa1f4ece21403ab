use crate::models::activity::TimeSlot;
use crate::models::schedule::UserPreferences;
use crate::models::settings::ScoringWeights;
use crate::services::schedule_utils;

/// Desirability of a (band, weekday) pair for a user, in [0,1].
#[derive(Debug, Clone, Default)]
pub struct SlotScorer {
    weights: ScoringWeights,
}

impl SlotScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, slot: TimeSlot, day_of_week: u32, preferences: &UserPreferences) -> f64 {
        let mut score = self.weights.base;

        if slot == preferences.preferred_workout_time {
            score += self.weights.preferred_band_bonus;
        }

        if schedule_utils::is_weekday(day_of_week) {
            score += self.weights.weekday_bonus;
        }

        // Very early slots are only attractive to users who asked for them.
        if slot == TimeSlot::EarlyMorning && preferences.preferred_workout_time != slot {
            score -= self.weights.early_morning_penalty;
        }

        score.clamp(0.0, 1.0)
    }
}
