//! Structural overload detection.
//!
//! Independent of weighting and of how time was actually allocated: the
//! backlog is overloaded when finishing every task on time needs more
//! minutes per day than are usable today.

use chrono::NaiveDate;

use super::scoring::days_left;
use crate::task::Task;

/// Unweighted minutes per day needed to finish every task by its due date.
pub fn min_daily_need(tasks: &[Task], reference: NaiveDate) -> f64 {
    tasks
        .iter()
        .filter(|t| t.remaining_minutes > 0)
        .map(|t| f64::from(t.remaining_minutes) / days_left(reference, t.due_date) as f64)
        .sum()
}

pub fn is_overloaded(tasks: &[Task], reference: NaiveDate, usable_minutes: u32) -> bool {
    min_daily_need(tasks, reference) > f64::from(usable_minutes)
}
