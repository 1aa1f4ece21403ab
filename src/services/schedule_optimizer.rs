use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rayon::prelude::*;
use serde_json::json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::adjustment::{
    ReadinessPatterns, ScheduleAdjustment, UserFeedback, WorkoutTimingAdvice,
};
use crate::models::schedule::{
    OptimizationRequest, ScheduleConstraint, ScheduleOptimization, ScheduledActivity,
    UserPreferences,
};
use crate::models::settings::OptimizerSettings;
use crate::services::adherence_evaluator::AdherenceEvaluator;
use crate::services::adjustment_service::AdjustmentService;
use crate::services::availability_generator::AvailabilityGenerator;
use crate::services::constraint_scheduler::ConstraintScheduler;
use crate::services::recommendation_engine::RecommendationEngine;
use crate::services::slot_scorer::SlotScorer;
use crate::services::time_slot_catalog::TimeSlotCatalog;

const MAX_PRIORITY: u8 = 5;
const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Entry point of the weekly optimizer. Holds only immutable settings, so one
/// instance can serve many users concurrently.
pub struct ScheduleOptimizer {
    settings: OptimizerSettings,
    catalog: TimeSlotCatalog,
    scorer: SlotScorer,
    adherence: AdherenceEvaluator,
}

impl ScheduleOptimizer {
    pub fn new(settings: OptimizerSettings) -> Self {
        let catalog = TimeSlotCatalog::new(settings.time_slots.clone());
        let scorer = SlotScorer::new(settings.scoring.clone());
        let adherence = AdherenceEvaluator::new(settings.adherence.clone());
        Self {
            settings,
            catalog,
            scorer,
            adherence,
        }
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    pub fn optimize_schedule(
        &self,
        week_start: NaiveDate,
        constraints: &[ScheduleConstraint],
        preferences: &UserPreferences,
        existing_activities: &[ScheduledActivity],
    ) -> AppResult<ScheduleOptimization> {
        validate_preferences(preferences)?;
        validate_constraints(constraints)?;
        validate_existing_activities(existing_activities)?;

        info!(
            target: "app::schedule",
            user_id = %preferences.user_id,
            %week_start,
            constraints = constraints.len(),
            existing = existing_activities.len(),
            "starting schedule optimization"
        );

        let available_slots = AvailabilityGenerator::new(&self.catalog, &self.scorer).generate(
            week_start,
            preferences,
            existing_activities,
        );

        let outcome = ConstraintScheduler::new(&self.settings).schedule(
            constraints,
            available_slots,
            preferences,
        );

        let adherence_score = self.adherence.evaluate(&outcome.activities, constraints);

        let recommendations =
            RecommendationEngine::new(&self.settings.recommendations, &self.catalog).generate(
                &outcome.activities,
                constraints,
                &outcome.conflicts,
                preferences,
            );

        info!(
            target: "app::schedule",
            user_id = %preferences.user_id,
            activities_scheduled = outcome.activities.len(),
            conflicts = outcome.conflicts.len(),
            adherence_score,
            "schedule optimization completed"
        );

        Ok(ScheduleOptimization {
            user_id: preferences.user_id.clone(),
            week_start,
            scheduled_activities: outcome.activities,
            conflicts: outcome.conflicts,
            recommendations,
            adherence_score,
        })
    }

    pub fn optimize(&self, request: &OptimizationRequest) -> AppResult<ScheduleOptimization> {
        self.optimize_schedule(
            request.week_start,
            &request.constraints,
            &request.preferences,
            &request.existing_activities,
        )
    }

    /// Independent runs in parallel; results keep request order.
    pub fn optimize_batch(
        &self,
        requests: &[OptimizationRequest],
    ) -> Vec<AppResult<ScheduleOptimization>> {
        requests
            .par_iter()
            .map(|request| self.optimize(request))
            .collect()
    }

    pub fn suggest_schedule_adjustments(
        &self,
        optimization: &ScheduleOptimization,
        feedback: &UserFeedback,
    ) -> Vec<ScheduleAdjustment> {
        self.adjustments()
            .suggest_schedule_adjustments(optimization, feedback)
    }

    pub fn optimal_workout_timing(
        &self,
        user_id: &str,
        patterns: Option<&ReadinessPatterns>,
    ) -> WorkoutTimingAdvice {
        self.adjustments().optimal_workout_timing(user_id, patterns)
    }

    fn adjustments(&self) -> AdjustmentService<'_> {
        AdjustmentService::new(
            &self.settings.recommendations,
            &self.settings.workout_timing,
        )
    }
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        Self::new(OptimizerSettings::default())
    }
}

pub fn validate_preferences(preferences: &UserPreferences) -> AppResult<()> {
    if preferences.user_id.trim().is_empty() {
        return Err(AppError::validation("userId must not be empty"));
    }

    if let Some(day) = preferences.rest_days.iter().find(|day| !(1..=7).contains(*day)) {
        return Err(AppError::validation_with_details(
            "rest days must be ISO weekdays 1-7",
            json!({"field": "restDays", "value": day}),
        ));
    }

    if preferences.work_start_time == preferences.work_end_time {
        return Err(AppError::validation_with_details(
            "work start and end must differ",
            json!({"field": "workStartTime", "value": preferences.work_start_time.to_string()}),
        ));
    }

    Tz::from_str(&preferences.timezone).map_err(|_| {
        AppError::validation_with_details(
            "unknown timezone",
            json!({"field": "timezone", "value": preferences.timezone}),
        )
    })?;

    Ok(())
}

pub fn validate_constraints(constraints: &[ScheduleConstraint]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for constraint in constraints {
        validate_constraint(constraint)?;
        if !seen.insert(constraint.id.as_str()) {
            return Err(invalid_constraint(
                constraint,
                "id",
                json!(constraint.id),
                "duplicate constraint id",
            ));
        }
    }
    Ok(())
}

fn validate_constraint(constraint: &ScheduleConstraint) -> AppResult<()> {
    if constraint.id.trim().is_empty() {
        return Err(invalid_constraint(
            constraint,
            "id",
            json!(constraint.id),
            "constraint id must not be empty",
        ));
    }

    if constraint.duration_minutes <= 0 || constraint.duration_minutes > MAX_DURATION_MINUTES {
        return Err(invalid_constraint(
            constraint,
            "durationMinutes",
            json!(constraint.duration_minutes),
            "duration must be between 1 minute and 24 hours",
        ));
    }

    if constraint.frequency_per_week == 0 {
        return Err(invalid_constraint(
            constraint,
            "frequencyPerWeek",
            json!(constraint.frequency_per_week),
            "frequency must be at least 1",
        ));
    }

    if !(1..=MAX_PRIORITY).contains(&constraint.priority) {
        return Err(invalid_constraint(
            constraint,
            "priority",
            json!(constraint.priority),
            "priority must be between 1 and 5",
        ));
    }

    if constraint.preferred_time_slots.is_empty() {
        return Err(invalid_constraint(
            constraint,
            "preferredTimeSlots",
            json!([]),
            "at least one preferred time slot is required",
        ));
    }

    if constraint.preferred_days.is_empty() {
        return Err(invalid_constraint(
            constraint,
            "preferredDays",
            json!([]),
            "at least one preferred day is required",
        ));
    }

    if let Some(day) = constraint.preferred_days.iter().find(|day| !(1..=7).contains(*day)) {
        return Err(invalid_constraint(
            constraint,
            "preferredDays",
            json!(day),
            "preferred days must be ISO weekdays 1-7",
        ));
    }

    if constraint.must_have_spacing_hours < 0 {
        return Err(invalid_constraint(
            constraint,
            "mustHaveSpacingHours",
            json!(constraint.must_have_spacing_hours),
            "spacing must not be negative",
        ));
    }

    Ok(())
}

/// Fixed calendar items may fall outside the week; they simply block nothing there.
pub fn validate_existing_activities(activities: &[ScheduledActivity]) -> AppResult<()> {
    for activity in activities {
        if activity.id.trim().is_empty() {
            return Err(invalid_activity(
                activity,
                "id",
                json!(activity.id),
                "existing activity id must not be empty",
            ));
        }

        if activity.duration_minutes <= 0 || activity.duration_minutes > MAX_DURATION_MINUTES {
            return Err(invalid_activity(
                activity,
                "durationMinutes",
                json!(activity.duration_minutes),
                "existing activity duration must be between 1 minute and 24 hours",
            ));
        }

        if !(1..=7).contains(&activity.day_of_week) {
            return Err(invalid_activity(
                activity,
                "dayOfWeek",
                json!(activity.day_of_week),
                "day of week must be an ISO weekday 1-7",
            ));
        }
    }
    Ok(())
}

fn invalid_activity(
    activity: &ScheduledActivity,
    field: &str,
    value: serde_json::Value,
    message: &str,
) -> AppError {
    AppError::validation_with_details(
        message,
        json!({"activityId": activity.id, "field": field, "value": value}),
    )
}

fn invalid_constraint(
    constraint: &ScheduleConstraint,
    field: &str,
    value: serde_json::Value,
    message: &str,
) -> AppError {
    AppError::validation_with_details(
        message,
        json!({"constraintId": constraint.id, "field": field, "value": value}),
    )
}
