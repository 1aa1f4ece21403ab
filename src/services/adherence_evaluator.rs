use crate::models::schedule::{ScheduleConstraint, ScheduledActivity};
use crate::models::settings::AdherenceSettings;

/// Scores how completely a schedule satisfies its constraint set.
#[derive(Debug, Clone, Default)]
pub struct AdherenceEvaluator {
    settings: AdherenceSettings,
}

impl AdherenceEvaluator {
    pub fn new(settings: AdherenceSettings) -> Self {
        Self { settings }
    }

    /// Mean of per-constraint scores; 1.0 when there is nothing to satisfy.
    pub fn evaluate(
        &self,
        scheduled_activities: &[ScheduledActivity],
        constraints: &[ScheduleConstraint],
    ) -> f64 {
        if constraints.is_empty() {
            return 1.0;
        }

        let total: f64 = constraints
            .iter()
            .map(|constraint| self.constraint_score(scheduled_activities, constraint))
            .sum();

        (total / constraints.len() as f64).clamp(0.0, 1.0)
    }

    pub fn constraint_score(
        &self,
        scheduled_activities: &[ScheduledActivity],
        constraint: &ScheduleConstraint,
    ) -> f64 {
        if constraint.frequency_per_week == 0 {
            return 1.0;
        }

        let matching: Vec<&ScheduledActivity> = scheduled_activities
            .iter()
            .filter(|activity| activity.constraint_id == constraint.id)
            .collect();

        let fulfilment =
            (matching.len() as f64 / constraint.frequency_per_week as f64).min(1.0);

        let in_preferred_band = matching
            .iter()
            .filter(|activity| {
                activity
                    .time_slot
                    .is_some_and(|slot| constraint.prefers_slot(slot))
            })
            .count();
        let timing_bonus = in_preferred_band as f64 * self.settings.preferred_band_bonus;

        (fulfilment + timing_bonus).clamp(0.0, 1.0)
    }
}
