use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::activity::{ActivityType, TimeSlot};
use crate::models::settings::{BandWeights, OptimizerSettings};
use crate::services::schedule_utils;

/// Loads and validates optimizer settings. Missing keys fall back to defaults.
pub struct SettingsService;

impl SettingsService {
    pub fn from_yaml_str(raw: &str) -> AppResult<OptimizerSettings> {
        let settings: OptimizerSettings = if raw.trim().is_empty() {
            OptimizerSettings::default()
        } else {
            serde_yaml::from_str(raw)?
        };
        Self::validate(&settings)?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> AppResult<OptimizerSettings> {
        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&raw)?;
        info!(
            target: "app::settings",
            path = %path.display(),
            "optimizer settings loaded"
        );
        Ok(settings)
    }

    pub fn to_yaml_string(settings: &OptimizerSettings) -> AppResult<String> {
        Ok(serde_yaml::to_string(settings)?)
    }

    pub fn validate(settings: &OptimizerSettings) -> AppResult<()> {
        for slot in TimeSlot::ALL {
            let range = settings.time_slots.range_of(slot);
            if schedule_utils::duration_minutes(range.start, range.end) == 0 {
                return Err(AppError::validation_with_details(
                    "time slot range must not be empty",
                    json!({"timeSlot": slot.as_str(), "start": range.start.to_string()}),
                ));
            }
        }

        let scoring = &settings.scoring;
        ensure_unit_interval("scoring.base", scoring.base)?;
        ensure_unit_interval("scoring.preferredBandBonus", scoring.preferred_band_bonus)?;
        ensure_unit_interval("scoring.weekdayBonus", scoring.weekday_bonus)?;
        ensure_unit_interval("scoring.earlyMorningPenalty", scoring.early_morning_penalty)?;

        if settings.max_occurrences_per_constraint == 0 {
            return Err(AppError::validation(
                "maxOccurrencesPerConstraint must be at least 1",
            ));
        }

        ensure_unit_interval(
            "adherence.preferredBandBonus",
            settings.adherence.preferred_band_bonus,
        )?;

        let recommendations = &settings.recommendations;
        if !(1..=5).contains(&recommendations.high_priority_threshold) {
            return Err(AppError::validation_with_details(
                "recommendations.highPriorityThreshold must be between 1 and 5",
                json!({"value": recommendations.high_priority_threshold}),
            ));
        }
        ensure_unit_interval(
            "recommendations.lowAdherenceThreshold",
            recommendations.low_adherence_threshold,
        )?;

        for activity_type in ActivityType::ALL {
            if settings.titles.title_for(activity_type).trim().is_empty() {
                return Err(AppError::validation_with_details(
                    "activity title must not be empty",
                    json!({"activityType": activity_type.as_str()}),
                ));
            }
        }

        let timing = &settings.workout_timing;
        ensure_unit_interval("workoutTiming.energyWeight", timing.energy_weight)?;
        ensure_unit_interval("workoutTiming.sleepWeight", timing.sleep_weight)?;
        ensure_band_weights("workoutTiming.defaultEnergy", &timing.default_energy)?;
        ensure_band_weights("workoutTiming.defaultSleep", &timing.default_sleep)?;

        Ok(())
    }
}

fn ensure_unit_interval(field: &str, value: f64) -> AppResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AppError::validation_with_details(
            "setting must be within [0, 1]",
            json!({"field": field, "value": value}),
        ))
    }
}

fn ensure_band_weights(field: &str, weights: &BandWeights) -> AppResult<()> {
    for slot in TimeSlot::ALL {
        ensure_unit_interval(&format!("{field}.{slot}"), weights.get(slot))?;
    }
    Ok(())
}
