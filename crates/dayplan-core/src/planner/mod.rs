//! Daily plan allocation engine.
//!
//! Turns (today's time budget, active tasks) into a ranked, bounded,
//! rounding-exact allocation, and applies a worked day back onto tasks.
//!
//! ```text
//! DailyContext ──> usable_minutes ─┐
//!                                  ├─> allocate ─> correct_drift ─> PlanResult
//! active tasks ──> score_tasks ────┘                                  ^
//!      └────────────> is_overloaded ──────────────────────────────────┘
//! ```
//!
//! Every stage except [`generate_daily_plan`] and [`apply_plan_progress`]
//! is a pure function over values, so it can be tested without storage.

mod allocate;
mod budget;
mod config;
mod drift;
mod overload;
mod plan;
mod progress;
mod scoring;

pub use allocate::{allocate, Allocation};
pub use budget::usable_minutes;
pub use config::{DisplayBand, PlannerConfig, WeightTable};
pub use drift::{correct_drift, DriftCorrection};
pub use overload::{is_overloaded, min_daily_need};
pub use plan::{assemble_plan, generate_daily_plan, PlanResult};
pub use progress::{apply_plan_progress, compute_progress, ProgressDelta};
pub use scoring::{days_left, score_tasks, urgency_score, ScoredTask};

/// Round half to even, the rounding every planner stage uses.
pub(crate) fn round_minutes(value: f64) -> i64 {
    // `as` saturates and maps NaN to 0.
    value.round_ties_even() as i64
}
