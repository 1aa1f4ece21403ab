use std::collections::BTreeSet;

use crate::models::activity::{ActivityType, TimeSlot};
use crate::models::schedule::{Conflict, ScheduleConstraint, ScheduledActivity, UserPreferences};
use crate::models::settings::RecommendationSettings;
use crate::services::schedule_utils;
use crate::services::time_slot_catalog::TimeSlotCatalog;

pub const RELAX_AVAILABILITY: &str = "High-priority activities couldn't be scheduled. Consider adjusting your availability or reducing activity frequency.";
pub const SPREAD_WORKOUTS: &str =
    "Consider spreading workouts across more days for better recovery and consistency.";
pub const MORE_MORNING_WORKOUTS: &str =
    "Try to schedule more workouts in the morning to match your preferences.";
pub const REGULAR_MEALS: &str = "Ensure you have time for regular meals throughout the day.";

/// Rule-based suggestions derived from a finished run. Each rule adds at most one line.
pub struct RecommendationEngine<'a> {
    settings: &'a RecommendationSettings,
    catalog: &'a TimeSlotCatalog,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(settings: &'a RecommendationSettings, catalog: &'a TimeSlotCatalog) -> Self {
        Self { settings, catalog }
    }

    pub fn generate(
        &self,
        scheduled_activities: &[ScheduledActivity],
        constraints: &[ScheduleConstraint],
        conflicts: &[Conflict],
        preferences: &UserPreferences,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if conflicts
            .iter()
            .any(|conflict| conflict.priority >= self.settings.high_priority_threshold)
        {
            recommendations.push(RELAX_AVAILABILITY.to_string());
        }

        // The remaining rules only judge runs that had constraints.
        if constraints.is_empty() {
            return recommendations;
        }

        let workouts = of_type(scheduled_activities, ActivityType::Workout);
        let workout_days: BTreeSet<u32> = workouts
            .iter()
            .map(|activity| schedule_utils::iso_weekday(activity.scheduled_date))
            .collect();
        if workout_days.len() < self.settings.min_workout_days {
            recommendations.push(SPREAD_WORKOUTS.to_string());
        }

        if preferences.preferred_workout_time == TimeSlot::Morning {
            let (_, morning_end) = self.catalog.range_of(TimeSlot::Morning);
            let morning_workouts = workouts
                .iter()
                .filter(|activity| activity.start_time < morning_end)
                .count();
            if morning_workouts < self.settings.min_morning_workouts {
                recommendations.push(MORE_MORNING_WORKOUTS.to_string());
            }
        }

        if of_type(scheduled_activities, ActivityType::Meal).len() < self.settings.min_meals {
            recommendations.push(REGULAR_MEALS.to_string());
        }

        recommendations
    }
}

fn of_type(
    scheduled_activities: &[ScheduledActivity],
    activity_type: ActivityType,
) -> Vec<&ScheduledActivity> {
    scheduled_activities
        .iter()
        .filter(|activity| activity.activity_type == activity_type)
        .collect()
}
