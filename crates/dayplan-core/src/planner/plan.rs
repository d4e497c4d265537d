//! Plan assembly.
//!
//! Gates, in order, each returning early with guidance:
//! 1. no daily context for the date
//! 2. no active tasks
//! 3. no usable minutes (buffer eats the day)
//! 4. no task with remaining minutes
//! 5. otherwise score, allocate, correct drift and check overload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::allocate::{allocate, Allocation};
use super::budget::usable_minutes;
use super::config::PlannerConfig;
use super::drift::correct_drift;
use super::overload::{is_overloaded, min_daily_need};
use super::scoring::score_tasks;
use crate::daily::DailyContext;
use crate::error::Result;
use crate::storage::PlanStore;
use crate::task::{Task, UserId};

pub const MSG_NO_CONTEXT: &str = "Enter today's available time first.";
pub const MSG_NO_TASKS: &str = "Add at least one task first.";
pub const MSG_NOTHING_REMAINING: &str = "All active tasks have 0 remaining minutes.";
pub const MSG_PLAN_GENERATED: &str =
    "Plan generated based on deadlines, difficulty, and importance.";
pub const MSG_PRIORITIZES_URGENT: &str =
    "This plan prioritizes the most urgent work; not everything fits today.";

/// Today's plan for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub date: NaiveDate,
    pub available_minutes: u32,
    pub buffer_minutes: u32,
    pub usable_minutes: u32,
    pub overloaded: bool,
    pub total_planned_minutes: u32,
    /// Usable minutes no task could take because every task is fully covered.
    pub unallocated_minutes: u32,
    /// Ordered by due date ascending.
    pub allocations: Vec<Allocation>,
    pub messages: Vec<String>,
}

impl PlanResult {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            available_minutes: 0,
            buffer_minutes: 0,
            usable_minutes: 0,
            overloaded: false,
            total_planned_minutes: 0,
            unallocated_minutes: 0,
            allocations: Vec::new(),
            messages: Vec::new(),
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

/// Build the plan for `date` from already-loaded state.
///
/// `tasks` are the user's active tasks in the store's order.
pub fn assemble_plan(
    date: NaiveDate,
    context: Option<&DailyContext>,
    tasks: &[Task],
    config: &PlannerConfig,
) -> PlanResult {
    let Some(ctx) = context else {
        return PlanResult::empty(date).with_message(MSG_NO_CONTEXT);
    };

    let usable = usable_minutes(ctx.available_minutes, Some(ctx.buffer_minutes));
    let mut plan = PlanResult {
        available_minutes: ctx.available_minutes,
        buffer_minutes: ctx.buffer_minutes,
        usable_minutes: usable,
        ..PlanResult::empty(date)
    };

    let active: Vec<Task> = tasks.iter().filter(|t| t.is_active()).cloned().collect();
    if active.is_empty() {
        return plan.with_message(MSG_NO_TASKS);
    }

    if usable == 0 {
        plan.overloaded = true;
        return plan
            .with_message("You are overloaded today: no usable time is left after your buffer.")
            .with_message(format!(
                "Your buffer ({} min) is at least your available time ({} min). \
                 Lower the buffer or add more time.",
                ctx.buffer_minutes, ctx.available_minutes
            ));
    }

    let band = config.band();
    let scored = score_tasks(&active, date, config);
    if scored.is_empty() {
        return plan.with_message(MSG_NOTHING_REMAINING);
    }

    let total_score: f64 = scored.iter().map(|s| s.score).sum();
    debug!(usable, total_score, tasks = scored.len(), "allocating usable minutes");

    let raw = allocate(&scored, total_score, usable, &band);
    let corrected = correct_drift(raw, &scored, usable, &band);
    let need = min_daily_need(&active, date);
    let overloaded = is_overloaded(&active, date, usable);

    plan.overloaded = overloaded;
    plan.total_planned_minutes = corrected.planned_total;
    plan.allocations = corrected.allocations;

    if overloaded {
        plan = plan
            .with_message(format!(
                "You are overloaded: finishing everything on time needs about {} min per day, \
                 but only {usable} min are usable today.",
                need.ceil()
            ))
            .with_message(MSG_PRIORITIZES_URGENT);
    } else {
        plan = plan.with_message(MSG_PLAN_GENERATED);
    }

    if corrected.residual > 0 {
        warn!(residual = corrected.residual, "drift left unallocated; every task is capped");
        let unallocated = u32::try_from(corrected.residual).unwrap_or(u32::MAX);
        plan.unallocated_minutes = unallocated;
        plan = plan.with_message(format!(
            "{unallocated} min left unplanned: every task already has all of its remaining time."
        ));
    }

    plan
}

/// Generate the plan for `user_id` on `date` from the store.
///
/// # Errors
/// Propagates storage failures and malformed stored dates.
pub fn generate_daily_plan(
    store: &impl PlanStore,
    user_id: UserId,
    date: NaiveDate,
    config: &PlannerConfig,
) -> Result<PlanResult> {
    let context = store.get_daily_context(user_id, date)?;
    let tasks = match context {
        Some(_) => store.list_active_tasks(user_id)?,
        None => Vec::new(),
    };
    let plan = assemble_plan(date, context.as_ref(), &tasks, config);
    info!(
        user_id,
        %date,
        usable = plan.usable_minutes,
        planned = plan.total_planned_minutes,
        overloaded = plan.overloaded,
        "generated daily plan"
    );
    Ok(plan)
}
