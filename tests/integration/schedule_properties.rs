use std::collections::HashMap;

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weekly_schedule_optimizer_lib::models::activity::{ActivityType, TimeSlot};
use weekly_schedule_optimizer_lib::models::schedule::{
    ScheduleConstraint, ScheduleOptimization, ScheduledActivity, UserPreferences,
};
use weekly_schedule_optimizer_lib::models::settings::{OptimizerSettings, SpacingMode};
use weekly_schedule_optimizer_lib::services::schedule_utils;
use weekly_schedule_optimizer_lib::ScheduleOptimizer;

const DURATIONS: [i64; 6] = [15, 30, 45, 60, 90, 120];

struct Fixture {
    week_start: NaiveDate,
    constraints: Vec<ScheduleConstraint>,
    preferences: UserPreferences,
    existing: Vec<ScheduledActivity>,
}

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

fn fixture(seed: u64) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    // Mondays and mid-week starts both occur in practice.
    let week_start = NaiveDate::from_ymd_opt(2025, 5, 5).expect("valid date")
        + Duration::days(rng.gen_range(0..7));

    let rest_days: Vec<u32> = (1..=7).filter(|_| rng.gen_bool(0.15)).collect();
    let preferences = UserPreferences {
        user_id: format!("user-{seed}"),
        wake_up_time: t(6, 0),
        bed_time: t(22, 0),
        work_start_time: t(9, 0),
        work_end_time: t(17, 0),
        preferred_workout_time: TimeSlot::ALL[rng.gen_range(0..TimeSlot::ALL.len())],
        preferred_meal_times: Default::default(),
        rest_days,
        timezone: "UTC".to_string(),
    };

    let constraint_count = rng.gen_range(2..8);
    let constraints = (0..constraint_count)
        .map(|idx| {
            let mut bands: Vec<TimeSlot> = TimeSlot::ALL
                .into_iter()
                .filter(|_| rng.gen_bool(0.4))
                .collect();
            if bands.is_empty() {
                bands.push(TimeSlot::ALL[rng.gen_range(0..TimeSlot::ALL.len())]);
            }
            let mut days: Vec<u32> = (1..=7).filter(|_| rng.gen_bool(0.6)).collect();
            if days.is_empty() {
                days.push(rng.gen_range(1..=7));
            }
            ScheduleConstraint {
                id: format!("c-{idx}"),
                activity_type: ActivityType::ALL[idx % ActivityType::ALL.len()],
                preferred_time_slots: bands,
                preferred_days: days,
                duration_minutes: DURATIONS[rng.gen_range(0..DURATIONS.len())],
                frequency_per_week: rng.gen_range(1..=7),
                priority: rng.gen_range(1..=5),
                must_have_spacing_hours: if rng.gen_bool(0.25) { 24 } else { 0 },
                flexible_timing: true,
            }
        })
        .collect();

    let existing_count = rng.gen_range(0..4);
    let existing = (0..existing_count)
        .map(|idx| {
            let date = week_start + Duration::days(rng.gen_range(0..7));
            let start = t(rng.gen_range(6..20), 0);
            ScheduledActivity {
                id: format!("existing-{idx}"),
                user_id: format!("user-{seed}"),
                activity_type: ActivityType::Habit,
                title: "Calendar event".to_string(),
                description: String::new(),
                scheduled_date: date,
                start_time: start,
                end_time: schedule_utils::add_minutes(start, 60),
                duration_minutes: 60,
                constraint_id: "external".to_string(),
                priority: 3,
                time_slot: None,
                day_of_week: schedule_utils::iso_weekday(date),
            }
        })
        .collect();

    Fixture {
        week_start,
        constraints,
        preferences,
        existing,
    }
}

fn run(optimizer: &ScheduleOptimizer, fixture: &Fixture) -> ScheduleOptimization {
    optimizer
        .optimize_schedule(
            fixture.week_start,
            &fixture.constraints,
            &fixture.preferences,
            &fixture.existing,
        )
        .expect("generated fixtures are valid")
}

fn optimizers() -> Vec<ScheduleOptimizer> {
    let placed = OptimizerSettings {
        spacing_mode: SpacingMode::PlacedOccurrences,
        ..OptimizerSettings::default()
    };
    vec![ScheduleOptimizer::default(), ScheduleOptimizer::new(placed)]
}

fn each_case(mut check: impl FnMut(&Fixture, &ScheduleOptimization)) {
    for optimizer in optimizers() {
        for seed in 1..=40 {
            let fixture = fixture(seed);
            let result = run(&optimizer, &fixture);
            check(&fixture, &result);
        }
    }
}

#[test]
fn activities_never_overlap_each_other_or_existing_entries() {
    each_case(|fixture, result| {
        let placed = &result.scheduled_activities;
        for (i, a) in placed.iter().enumerate() {
            // Fixture calendar entries may overlap one another; only placed ones are checked.
            for b in placed.iter().skip(i + 1).chain(fixture.existing.iter()) {
                if a.scheduled_date != b.scheduled_date {
                    continue;
                }
                assert!(
                    !schedule_utils::overlaps(a.minute_range(), b.minute_range()),
                    "{} overlaps {} on {}",
                    a.id,
                    b.id,
                    a.scheduled_date
                );
            }
        }
    });
}

#[test]
fn occurrences_never_exceed_requested_frequency() {
    each_case(|fixture, result| {
        let mut placed: HashMap<&str, u32> = HashMap::new();
        for activity in &result.scheduled_activities {
            *placed.entry(activity.constraint_id.as_str()).or_default() += 1;
        }

        for constraint in &fixture.constraints {
            let count = placed.get(constraint.id.as_str()).copied().unwrap_or(0);
            assert!(count <= constraint.frequency_per_week);

            let unmet: u32 = result
                .conflicts
                .iter()
                .filter(|conflict| conflict.constraint_id == constraint.id)
                .map(|conflict| conflict.unmet_occurrences)
                .sum();
            assert_eq!(count + unmet, constraint.frequency_per_week);
        }
    });
}

#[test]
fn activities_respect_bands_days_and_rest_days() {
    each_case(|fixture, result| {
        for activity in &result.scheduled_activities {
            let constraint = fixture
                .constraints
                .iter()
                .find(|constraint| constraint.id == activity.constraint_id)
                .expect("activity references a known constraint");
            let slot = activity.time_slot.expect("scheduled activities carry a band");

            assert!(constraint.prefers_slot(slot));
            assert!(constraint.prefers_day(activity.day_of_week));
            assert!(!fixture.preferences.is_rest_day(activity.day_of_week));
            assert_eq!(
                activity.day_of_week,
                schedule_utils::iso_weekday(activity.scheduled_date)
            );
            assert_eq!(activity.duration_minutes, constraint.duration_minutes);
        }
    });
}

#[test]
fn dates_stay_within_the_week_window() {
    each_case(|fixture, result| {
        let last_day = fixture.week_start + Duration::days(6);
        for activity in &result.scheduled_activities {
            assert!(activity.scheduled_date >= fixture.week_start);
            assert!(activity.scheduled_date <= last_day);
        }
    });
}

#[test]
fn adherence_score_is_a_unit_interval_value() {
    each_case(|_, result| {
        assert!((0.0..=1.0).contains(&result.adherence_score));
    });
}

#[test]
fn identical_inputs_give_identical_output() {
    for optimizer in optimizers() {
        for seed in 1..=20 {
            let fixture = fixture(seed);
            assert_eq!(run(&optimizer, &fixture), run(&optimizer, &fixture));
        }
    }
}

#[test]
fn higher_priority_wins_when_demand_exceeds_supply() {
    let base = ScheduleConstraint {
        id: "low".to_string(),
        activity_type: ActivityType::Habit,
        preferred_time_slots: vec![TimeSlot::Evening],
        preferred_days: vec![1, 2, 3],
        duration_minutes: 60,
        frequency_per_week: 3,
        priority: 1,
        must_have_spacing_hours: 0,
        flexible_timing: true,
    };
    let high = ScheduleConstraint {
        id: "high".to_string(),
        priority: 4,
        ..base.clone()
    };

    let fixture = Fixture {
        week_start: NaiveDate::from_ymd_opt(2025, 5, 5).expect("valid date"),
        constraints: vec![base, high],
        preferences: UserPreferences {
            rest_days: Vec::new(),
            ..fixture(3).preferences
        },
        existing: Vec::new(),
    };
    let result = run(&ScheduleOptimizer::default(), &fixture);

    let count = |id: &str| {
        result
            .scheduled_activities
            .iter()
            .filter(|activity| activity.constraint_id == id)
            .count()
    };
    assert!(count("high") >= count("low"));
    assert_eq!(count("high"), 3);
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].constraint_id, "low");
}
