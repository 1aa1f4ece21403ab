use std::cmp::Ordering;

use tracing::debug;

use crate::models::activity::TimeSlot;
use crate::models::adjustment::{
    AdjustmentKind, AdjustmentPriority, ReadinessPatterns, ScheduleAdjustment, SlotTimingScore,
    UserFeedback, WorkoutTimingAdvice,
};
use crate::models::schedule::ScheduleOptimization;
use crate::models::settings::{RecommendationSettings, WorkoutTimingSettings};

/// Follow-up suggestions for a published week and workout-timing advice.
pub struct AdjustmentService<'a> {
    recommendations: &'a RecommendationSettings,
    timing: &'a WorkoutTimingSettings,
}

impl<'a> AdjustmentService<'a> {
    pub fn new(
        recommendations: &'a RecommendationSettings,
        timing: &'a WorkoutTimingSettings,
    ) -> Self {
        Self {
            recommendations,
            timing,
        }
    }

    pub fn suggest_schedule_adjustments(
        &self,
        optimization: &ScheduleOptimization,
        feedback: &UserFeedback,
    ) -> Vec<ScheduleAdjustment> {
        let mut suggestions: Vec<ScheduleAdjustment> = optimization
            .conflicts
            .iter()
            .filter(|conflict| conflict.priority >= self.recommendations.high_priority_threshold)
            .map(|conflict| ScheduleAdjustment {
                kind: AdjustmentKind::Reschedule,
                constraint_id: Some(conflict.constraint_id.clone()),
                suggestion: "Consider moving this activity to a different day or time".to_string(),
                priority: AdjustmentPriority::High,
            })
            .collect();

        if optimization.adherence_score < self.recommendations.low_adherence_threshold {
            suggestions.push(ScheduleAdjustment {
                kind: AdjustmentKind::FrequencyAdjustment,
                constraint_id: None,
                suggestion: "Consider reducing the frequency of some activities to improve schedule adherence".to_string(),
                priority: AdjustmentPriority::Medium,
            });
        }

        if feedback.too_many_morning_activities {
            suggestions.push(ScheduleAdjustment {
                kind: AdjustmentKind::TimingAdjustment,
                constraint_id: None,
                suggestion: "Try spreading activities throughout the day instead of clustering them in the morning".to_string(),
                priority: AdjustmentPriority::Medium,
            });
        }

        if feedback.need_more_rest_days {
            suggestions.push(ScheduleAdjustment {
                kind: AdjustmentKind::RestDayAdjustment,
                constraint_id: None,
                suggestion: "Consider adding more rest days or reducing workout frequency"
                    .to_string(),
                priority: AdjustmentPriority::Medium,
            });
        }

        debug!(
            target: "app::schedule",
            user_id = %optimization.user_id,
            count = suggestions.len(),
            "schedule adjustments suggested"
        );

        suggestions
    }

    /// Ranks every band except night by weighted energy and sleep recovery.
    /// Falls back to the configured default patterns when none are supplied.
    pub fn optimal_workout_timing(
        &self,
        user_id: &str,
        patterns: Option<&ReadinessPatterns>,
    ) -> WorkoutTimingAdvice {
        let (energy, sleep) = match patterns {
            Some(patterns) => (&patterns.energy, &patterns.sleep),
            None => (&self.timing.default_energy, &self.timing.default_sleep),
        };

        let mut optimal_slots: Vec<SlotTimingScore> = TimeSlot::ALL
            .into_iter()
            .filter(|slot| *slot != TimeSlot::Night)
            .map(|time_slot| {
                let energy_score = energy.get(time_slot);
                let sleep_score = sleep.get(time_slot);
                SlotTimingScore {
                    time_slot,
                    score: energy_score * self.timing.energy_weight
                        + sleep_score * self.timing.sleep_weight,
                    energy_score,
                    sleep_score,
                }
            })
            .collect();

        // Stable: equal scores keep day order.
        optimal_slots.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let recommendation = optimal_slots
            .first()
            .map(|slot| slot.time_slot)
            .unwrap_or(TimeSlot::Morning);

        WorkoutTimingAdvice {
            user_id: user_id.to_string(),
            reasoning: format!(
                "Based on your energy patterns and sleep data, {recommendation} appears to be your optimal workout time."
            ),
            optimal_slots,
            recommendation,
        }
    }
}
