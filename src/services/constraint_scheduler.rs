use std::cmp::Ordering;

use chrono::NaiveDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::schedule::{
    AvailableSlot, Conflict, ConflictReason, ScheduleConstraint, ScheduledActivity,
    UserPreferences,
};
use crate::models::settings::{OptimizerSettings, SpacingMode};
use crate::services::schedule_utils;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulingOutcome {
    pub activities: Vec<ScheduledActivity>,
    pub conflicts: Vec<Conflict>,
}

/// Greedy, priority-ordered allocation of constraint occurrences onto the slot pool.
pub struct ConstraintScheduler<'a> {
    settings: &'a OptimizerSettings,
}

impl<'a> ConstraintScheduler<'a> {
    pub fn new(settings: &'a OptimizerSettings) -> Self {
        Self { settings }
    }

    pub fn schedule(
        &self,
        constraints: &[ScheduleConstraint],
        slots: Vec<AvailableSlot>,
        preferences: &UserPreferences,
    ) -> SchedulingOutcome {
        let mut pool = SlotPool::new(slots);
        let mut outcome = SchedulingOutcome::default();

        for index in priority_order(constraints) {
            let constraint = &constraints[index];
            self.schedule_constraint(constraint, &mut pool, preferences, &mut outcome);
        }

        outcome
    }

    fn schedule_constraint(
        &self,
        constraint: &ScheduleConstraint,
        pool: &mut SlotPool,
        preferences: &UserPreferences,
        outcome: &mut SchedulingOutcome,
    ) {
        let requested = constraint.frequency_per_week;
        let attempts = requested.min(self.settings.max_occurrences_per_constraint);
        let mut placed_starts: Vec<NaiveDateTime> = Vec::new();

        while (placed_starts.len() as u32) < attempts {
            let Some(slot_index) = self.find_best_slot(constraint, pool, &placed_starts) else {
                let unmet = requested - placed_starts.len() as u32;
                outcome.conflicts.push(build_conflict(
                    constraint,
                    ConflictReason::NoSuitableSlot,
                    unmet,
                ));
                warn!(
                    target: "app::schedule",
                    constraint_id = %constraint.id,
                    priority = constraint.priority,
                    unmet,
                    "no suitable slot left for constraint"
                );
                return;
            };

            let slot = pool.slot(slot_index).clone();
            placed_starts.push(slot.starts_at());
            outcome
                .activities
                .push(self.create_scheduled_activity(constraint, &slot, preferences));
            pool.claim(slot_index, constraint.duration_minutes);
        }

        let placed = placed_starts.len() as u32;
        if placed < requested {
            let unmet = requested - placed;
            outcome.conflicts.push(build_conflict(
                constraint,
                ConflictReason::FrequencyCapExceeded,
                unmet,
            ));
            warn!(
                target: "app::schedule",
                constraint_id = %constraint.id,
                requested,
                cap = self.settings.max_occurrences_per_constraint,
                "constraint frequency truncated at cap"
            );
        }

        debug!(
            target: "app::schedule",
            constraint_id = %constraint.id,
            activity_type = %constraint.activity_type,
            placed,
            requested,
            "constraint processed"
        );
    }

    fn find_best_slot(
        &self,
        constraint: &ScheduleConstraint,
        pool: &SlotPool,
        placed_starts: &[NaiveDateTime],
    ) -> Option<usize> {
        let open: Vec<usize> = pool.open_indices().collect();

        open.iter()
            .copied()
            .filter(|&index| {
                let slot = pool.slot(index);
                constraint.prefers_slot(slot.time_slot)
                    && constraint.prefers_day(slot.day_of_week)
                    && slot.available_duration >= constraint.duration_minutes
            })
            .filter(|&index| {
                self.meets_spacing_requirements(index, constraint, pool, &open, placed_starts)
            })
            .min_by(|&a, &b| compare_candidates(pool.slot(a), pool.slot(b)))
    }

    /// In `CandidatePeers` mode the candidate is measured against every other open
    /// slot of the pool, whatever its band or day.
    fn meets_spacing_requirements(
        &self,
        index: usize,
        constraint: &ScheduleConstraint,
        pool: &SlotPool,
        open: &[usize],
        placed_starts: &[NaiveDateTime],
    ) -> bool {
        if constraint.must_have_spacing_hours <= 0 {
            return true;
        }

        let spacing = constraint.must_have_spacing_hours as f64;
        let starts_at = pool.slot(index).starts_at();

        match self.settings.spacing_mode {
            SpacingMode::CandidatePeers => open
                .iter()
                .filter(|&&other| other != index)
                .all(|&other| {
                    schedule_utils::hours_between(starts_at, pool.slot(other).starts_at())
                        >= spacing
                }),
            SpacingMode::PlacedOccurrences => placed_starts
                .iter()
                .all(|&placed| schedule_utils::hours_between(starts_at, placed) >= spacing),
        }
    }

    fn create_scheduled_activity(
        &self,
        constraint: &ScheduleConstraint,
        slot: &AvailableSlot,
        preferences: &UserPreferences,
    ) -> ScheduledActivity {
        let start_time = slot.start_time;
        let end_time = schedule_utils::add_minutes(start_time, constraint.duration_minutes);
        let activity_key = format!(
            "{}:{}:{}:{}",
            preferences.user_id,
            constraint.id,
            slot.date.format("%Y%m%d"),
            slot.time_slot
        );

        ScheduledActivity {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, activity_key.as_bytes()).to_string(),
            user_id: preferences.user_id.clone(),
            activity_type: constraint.activity_type,
            title: self
                .settings
                .titles
                .title_for(constraint.activity_type)
                .to_string(),
            description: format!("Scheduled {}", constraint.activity_type),
            scheduled_date: slot.date,
            start_time,
            end_time,
            duration_minutes: constraint.duration_minutes,
            constraint_id: constraint.id.clone(),
            priority: constraint.priority,
            time_slot: Some(slot.time_slot),
            day_of_week: slot.day_of_week,
        }
    }
}

/// Constraint indices by priority descending; equal priorities keep input order.
fn priority_order(constraints: &[ScheduleConstraint]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..constraints.len()).collect();
    order.sort_by(|&a, &b| {
        constraints[b]
            .priority
            .cmp(&constraints[a].priority)
            .then_with(|| a.cmp(&b))
    });
    order
}

/// Highest score first, then earliest date, then earliest start.
fn compare_candidates(a: &AvailableSlot, b: &AvailableSlot) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.start_time.cmp(&b.start_time))
}

fn build_conflict(
    constraint: &ScheduleConstraint,
    reason: ConflictReason,
    unmet: u32,
) -> Conflict {
    Conflict {
        constraint_id: constraint.id.clone(),
        activity_type: constraint.activity_type,
        reason,
        message: reason.message().to_string(),
        priority: constraint.priority,
        requested_occurrences: constraint.frequency_per_week,
        unmet_occurrences: unmet,
    }
}

/// Index-keyed arena over the week's candidates. Claimed or blocked slots are
/// closed rather than removed, so indices stay stable for the whole run.
struct SlotPool {
    slots: Vec<AvailableSlot>,
    open: Vec<bool>,
}

impl SlotPool {
    fn new(slots: Vec<AvailableSlot>) -> Self {
        let open = vec![true; slots.len()];
        Self { slots, open }
    }

    fn slot(&self, index: usize) -> &AvailableSlot {
        &self.slots[index]
    }

    fn open_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(index, &open)| open.then_some(index))
    }

    /// Closes every open slot on the same date that overlaps `[start, start + duration)`.
    fn claim(&mut self, index: usize, duration_minutes: i64) {
        let used_date = self.slots[index].date;
        let used_start = schedule_utils::minutes_from_midnight(self.slots[index].start_time);
        let used = (used_start, used_start + duration_minutes);

        for (slot, open) in self.slots.iter().zip(self.open.iter_mut()) {
            if *open
                && slot.date == used_date
                && schedule_utils::overlaps(used, slot.minute_range())
            {
                *open = false;
            }
        }
    }
}
