use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::config::DisplayBand;
use super::round_minutes;
use super::scoring::ScoredTask;
use crate::task::TaskId;

/// Minutes assigned to one task for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub task_id: TaskId,
    pub title: String,
    pub due_date: NaiveDate,
    /// Never more than the task's remaining minutes.
    pub minutes: u32,
    pub range_lo: u32,
    pub range_hi: u32,
}

impl Allocation {
    pub fn new(
        task_id: TaskId,
        title: impl Into<String>,
        due_date: NaiveDate,
        minutes: u32,
        band: &DisplayBand,
    ) -> Self {
        let (range_lo, range_hi) = band.range(minutes);
        Self {
            task_id,
            title: title.into(),
            due_date,
            minutes,
            range_lo,
            range_hi,
        }
    }

    /// Same allocation with different minutes and a recomputed range.
    pub fn with_minutes(mut self, minutes: u32, band: &DisplayBand) -> Self {
        let (range_lo, range_hi) = band.range(minutes);
        self.minutes = minutes;
        self.range_lo = range_lo;
        self.range_hi = range_hi;
        self
    }
}

/// Split `usable_minutes` across `scored` in proportion to score.
///
/// Each share is rounded on its own and capped at the task's remaining
/// minutes, so the total can miss `usable_minutes` by a few minutes;
/// [`correct_drift`](super::correct_drift) fixes that. Input order is kept.
pub fn allocate(
    scored: &[ScoredTask],
    total_score: f64,
    usable_minutes: u32,
    band: &DisplayBand,
) -> Vec<Allocation> {
    scored
        .iter()
        .map(|s| {
            let share = if total_score > 0.0 { s.score / total_score } else { 0.0 };
            let raw = round_minutes(share * f64::from(usable_minutes)).max(0);
            let minutes = raw.min(i64::from(s.remaining_minutes)) as u32;
            Allocation::new(s.task_id, s.title.clone(), s.due_date, minutes, band)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: TaskId, remaining: u32, score: f64) -> ScoredTask {
        ScoredTask {
            task_id: id,
            title: format!("Task {id}"),
            due_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            remaining_minutes: remaining,
            score,
        }
    }

    #[test]
    fn shares_follow_score() {
        let tasks = vec![scored(1, 600, 100.8), scored(2, 180, 64.8), scored(3, 30, 10.0)];
        let total: f64 = tasks.iter().map(|t| t.score).sum();
        let allocs = allocate(&tasks, total, 150, &DisplayBand::default());
        let minutes: Vec<_> = allocs.iter().map(|a| a.minutes).collect();
        assert_eq!(minutes, vec![86, 55, 9]);
        assert_eq!((allocs[2].range_lo, allocs[2].range_hi), (7, 11));
    }

    #[test]
    fn minutes_are_capped_by_remaining() {
        let tasks = vec![scored(1, 10, 5.0), scored(2, 500, 5.0)];
        let allocs = allocate(&tasks, 10.0, 100, &DisplayBand::default());
        assert_eq!(allocs[0].minutes, 10);
        assert_eq!(allocs[1].minutes, 50);
    }

    #[test]
    fn zero_total_score_allocates_nothing() {
        let tasks = vec![scored(1, 60, 0.0)];
        let allocs = allocate(&tasks, 0.0, 100, &DisplayBand::default());
        assert_eq!(allocs[0].minutes, 0);
    }

    #[test]
    fn exact_halves_round_to_even() {
        let tasks = vec![scored(1, 60, 1.0), scored(2, 60, 1.0)];
        let allocs = allocate(&tasks, 2.0, 5, &DisplayBand::default());
        assert_eq!(allocs[0].minutes, 2);
        assert_eq!(allocs[1].minutes, 2);
    }
}
