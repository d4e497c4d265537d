//! Rounding drift correction.
//!
//! Allocations are re-ordered earliest deadline first and then nudged one
//! minute at a time, round-robin, until their sum equals the usable
//! minutes. A full pass where no allocation can move ends the loop; the
//! unabsorbed amount is reported as a residual.

use std::collections::HashMap;

use tracing::debug;

use super::allocate::Allocation;
use super::config::DisplayBand;
use super::scoring::ScoredTask;
use crate::task::TaskId;

/// Corrected allocations and what could not be absorbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftCorrection {
    /// Ordered by due date ascending.
    pub allocations: Vec<Allocation>,
    /// Sum of allocated minutes.
    pub planned_total: u32,
    /// `usable - planned_total` once no allocation can move. Positive when
    /// every task is at its cap, negative when every allocation is 0.
    pub residual: i64,
}

/// Make the allocations sum to `usable_minutes` without breaking bounds.
pub fn correct_drift(
    allocations: Vec<Allocation>,
    scored: &[ScoredTask],
    usable_minutes: u32,
    band: &DisplayBand,
) -> DriftCorrection {
    let caps: HashMap<TaskId, u32> = scored
        .iter()
        .map(|s| (s.task_id, s.remaining_minutes))
        .collect();

    let mut minutes: Vec<(Allocation, u32)> = allocations
        .into_iter()
        .map(|a| {
            let cap = caps.get(&a.task_id).copied().unwrap_or(a.minutes);
            (a, cap)
        })
        .collect();
    minutes.sort_by_key(|(a, _)| a.due_date);

    let allocated: i64 = minutes.iter().map(|(a, _)| i64::from(a.minutes)).sum();
    let mut drift = i64::from(usable_minutes) - allocated;
    debug!(drift, allocations = minutes.len(), "correcting rounding drift");

    let n = minutes.len();
    let mut idx = 0;
    let mut stalled = 0;
    while drift != 0 && n > 0 && stalled < n {
        let (alloc, cap) = &mut minutes[idx];
        let moved = if drift > 0 && alloc.minutes < *cap {
            alloc.minutes += 1;
            drift -= 1;
            true
        } else if drift < 0 && alloc.minutes > 0 {
            alloc.minutes -= 1;
            drift += 1;
            true
        } else {
            false
        };
        stalled = if moved { 0 } else { stalled + 1 };
        idx = (idx + 1) % n;
    }

    let allocations: Vec<Allocation> = minutes
        .into_iter()
        .map(|(a, _)| {
            let m = a.minutes;
            a.with_minutes(m, band)
        })
        .collect();
    let planned_total = allocations.iter().map(|a| a.minutes).sum();

    DriftCorrection {
        allocations,
        planned_total,
        residual: drift,
    }
}
