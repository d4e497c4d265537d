//! Applying a worked plan back onto tasks.
//!
//! Split into a pure [`compute_progress`] and a thin persistence step,
//! [`apply_plan_progress`]. Allocation values are trusted as given; the
//! plan is not recomputed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::allocate::Allocation;
use super::round_minutes;
use crate::error::{Result, ValidationError};
use crate::storage::PlanStore;
use crate::task::{Task, TaskId, UserId};

/// Change to one task's remaining minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDelta {
    pub task_id: TaskId,
    pub worked_minutes: u32,
    pub previous_remaining: u32,
    pub new_remaining: u32,
    /// Remaining minutes reached exactly 0.
    pub completed: bool,
}

/// Work out the deltas for `allocations` against the current `tasks`.
///
/// Allocations whose task is missing, owned by someone else, or whose
/// worked minutes round to 0 or less are skipped.
pub fn compute_progress(
    user_id: UserId,
    allocations: &[Allocation],
    tasks: &[Task],
    multiplier: f64,
) -> Vec<ProgressDelta> {
    let mut current: HashMap<TaskId, u32> = tasks
        .iter()
        .filter(|t| t.user_id == user_id)
        .map(|t| (t.id, t.remaining_minutes))
        .collect();

    let mut deltas = Vec::new();
    for alloc in allocations {
        let worked = round_minutes(f64::from(alloc.minutes) * multiplier);
        if worked <= 0 {
            continue;
        }
        let Some(remaining) = current.get_mut(&alloc.task_id) else {
            warn!(task_id = alloc.task_id, "skipping progress for missing task");
            continue;
        };
        let worked = u32::try_from(worked).unwrap_or(u32::MAX);
        let previous = *remaining;
        let new_remaining = previous.saturating_sub(worked);
        // Repeated allocations for one task chain off the updated value.
        *remaining = new_remaining;
        deltas.push(ProgressDelta {
            task_id: alloc.task_id,
            worked_minutes: worked,
            previous_remaining: previous,
            new_remaining,
            completed: new_remaining == 0,
        });
    }
    deltas
}

/// Reduce each allocated task's remaining minutes by the worked time and
/// mark tasks done when they reach 0.
///
/// Reads and writes are not one transaction: a task edited or deleted
/// since the plan was generated is handled best-effort.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for a negative or non-finite
/// multiplier, and propagates storage failures.
pub fn apply_plan_progress(
    store: &impl PlanStore,
    user_id: UserId,
    allocations: &[Allocation],
    multiplier: f64,
) -> Result<Vec<ProgressDelta>> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "multiplier".into(),
            message: format!("must be a finite number >= 0, got {multiplier}"),
        }
        .into());
    }

    let mut tasks = Vec::with_capacity(allocations.len());
    for alloc in allocations {
        if tasks.iter().any(|t: &Task| t.id == alloc.task_id) {
            continue;
        }
        match store.get_task(alloc.task_id)? {
            Some(task) if task.user_id == user_id => tasks.push(task),
            Some(_) => warn!(task_id = alloc.task_id, user_id, "skipping task owned by another user"),
            None => {}
        }
    }

    let deltas = compute_progress(user_id, allocations, &tasks, multiplier);
    for delta in &deltas {
        store.update_task_remaining_minutes(delta.task_id, delta.new_remaining)?;
        if delta.completed {
            store.mark_task_done(delta.task_id)?;
        }
    }

    info!(
        user_id,
        multiplier,
        updated = deltas.len(),
        completed = deltas.iter().filter(|d| d.completed).count(),
        "applied plan progress"
    );
    Ok(deltas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::config::DisplayBand;
    use crate::task::TaskStatus;
    use chrono::NaiveDate;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    fn task(id: TaskId, user_id: UserId, remaining: u32) -> Task {
        Task {
            id,
            user_id,
            title: format!("Task {id}"),
            course: None,
            due_date: due(),
            difficulty: 2,
            importance: 2,
            remaining_minutes: remaining,
            status: TaskStatus::Active,
        }
    }

    fn alloc(id: TaskId, minutes: u32) -> Allocation {
        Allocation::new(id, format!("Task {id}"), due(), minutes, &DisplayBand::default())
    }

    #[test]
    fn half_multiplier_halves_worked_time() {
        let deltas = compute_progress(1, &[alloc(1, 40)], &[task(1, 1, 100)], 0.5);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].worked_minutes, 20);
        assert_eq!(deltas[0].new_remaining, 80);
        assert!(!deltas[0].completed);
    }

    #[test]
    fn exact_finish_completes_task() {
        let deltas = compute_progress(1, &[alloc(1, 40)], &[task(1, 1, 20)], 0.5);
        assert_eq!(deltas[0].new_remaining, 0);
        assert!(deltas[0].completed);
    }

    #[test]
    fn never_goes_below_zero() {
        let deltas = compute_progress(1, &[alloc(1, 90)], &[task(1, 1, 30)], 1.0);
        assert_eq!(deltas[0].new_remaining, 0);
        assert!(deltas[0].completed);
    }

    #[test]
    fn skips_zero_work_missing_and_foreign_tasks() {
        let tasks = vec![task(1, 1, 50), task(2, 2, 50)];
        let allocs = vec![alloc(1, 0), alloc(2, 30), alloc(3, 30)];
        assert!(compute_progress(1, &allocs, &tasks, 1.0).is_empty());
        assert!(compute_progress(1, &[alloc(1, 1)], &tasks, 0.4).is_empty());
    }

    #[test]
    fn worked_minutes_round_half_to_even() {
        let deltas = compute_progress(1, &[alloc(1, 5)], &[task(1, 1, 50)], 0.5);
        assert_eq!(deltas[0].worked_minutes, 2);
    }
}
