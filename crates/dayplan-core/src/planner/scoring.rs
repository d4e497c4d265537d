//! Urgency scoring.
//!
//! ```text
//! days_left = max(1, (due - reference).days + 1)
//! score     = remaining / days_left * difficulty_weight * importance_weight
//! ```
//!
//! A task due today or overdue always has exactly one day left, so the
//! score never divides by zero or goes negative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::PlannerConfig;
use crate::task::{Task, TaskId};

/// An active task with work left, scored for one reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    pub task_id: TaskId,
    pub title: String,
    pub due_date: NaiveDate,
    pub remaining_minutes: u32,
    pub score: f64,
}

/// Days left including `reference` itself, never less than 1.
pub fn days_left(reference: NaiveDate, due_date: NaiveDate) -> i64 {
    ((due_date - reference).num_days() + 1).max(1)
}

/// Urgency of one task on `reference`. Higher means more urgent.
pub fn urgency_score(
    reference: NaiveDate,
    due_date: NaiveDate,
    remaining_minutes: u32,
    difficulty: u8,
    importance: u8,
    config: &PlannerConfig,
) -> f64 {
    let base_daily_need = f64::from(remaining_minutes) / days_left(reference, due_date) as f64;
    base_daily_need
        * config.difficulty_weights.weight(difficulty)
        * config.importance_weights.weight(importance)
}

/// Score every active task with remaining work, preserving input order.
pub fn score_tasks(tasks: &[Task], reference: NaiveDate, config: &PlannerConfig) -> Vec<ScoredTask> {
    tasks
        .iter()
        .filter(|t| t.is_active() && t.remaining_minutes > 0)
        .map(|t| ScoredTask {
            task_id: t.id,
            title: t.title.clone(),
            due_date: t.due_date,
            remaining_minutes: t.remaining_minutes,
            score: urgency_score(
                reference,
                t.due_date,
                t.remaining_minutes,
                t.difficulty,
                t.importance,
                config,
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use chrono::Duration;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn task(id: TaskId, remaining: u32, due: NaiveDate, status: TaskStatus) -> Task {
        Task {
            id,
            user_id: 1,
            title: format!("Task {id}"),
            course: None,
            due_date: due,
            difficulty: 2,
            importance: 2,
            remaining_minutes: remaining,
            status,
        }
    }

    #[test]
    fn days_left_counts_today() {
        assert_eq!(days_left(day(10), day(10)), 1);
        assert_eq!(days_left(day(10), day(11)), 2);
        assert_eq!(days_left(day(10), day(19)), 10);
    }

    #[test]
    fn overdue_tasks_have_one_day_left() {
        assert_eq!(days_left(day(10), day(9)), 1);
        assert_eq!(days_left(day(10), day(1)), 1);
    }

    #[test]
    fn score_applies_both_weights() {
        let cfg = PlannerConfig::default();
        let score = urgency_score(day(1), day(10), 600, 3, 3, &cfg);
        assert!((score - 100.8).abs() < 1e-9);
        let score = urgency_score(day(1), day(3), 30, 1, 2, &cfg);
        assert!((score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_ratings_weigh_one() {
        let cfg = PlannerConfig::default();
        let score = urgency_score(day(1), day(1), 50, 0, 9, &cfg);
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn score_tasks_skips_done_and_empty_tasks() {
        let cfg = PlannerConfig::default();
        let tasks = vec![
            task(1, 60, day(5), TaskStatus::Active),
            task(2, 0, day(5), TaskStatus::Active),
            task(3, 60, day(5), TaskStatus::Done),
            task(4, 30, day(2), TaskStatus::Active),
        ];
        let scored = score_tasks(&tasks, day(1), &cfg);
        let ids: Vec<_> = scored.iter().map(|s| s.task_id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    proptest! {
        #[test]
        fn days_left_is_at_least_one(offset in -10_000i64..10_000) {
            let reference = day(15);
            let due = reference + Duration::days(offset);
            prop_assert!(days_left(reference, due) >= 1);
        }

        #[test]
        fn scores_are_non_negative(
            remaining in 0u32..100_000,
            offset in -400i64..400,
            difficulty in 0u8..6,
            importance in 0u8..6,
        ) {
            let reference = day(15);
            let due = reference + Duration::days(offset);
            let score = urgency_score(
                reference, due, remaining, difficulty, importance, &PlannerConfig::default(),
            );
            prop_assert!(score >= 0.0 && score.is_finite());
        }
    }
}
