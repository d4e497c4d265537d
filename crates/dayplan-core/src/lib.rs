//! # Dayplan Core Library
//!
//! This library turns a fixed budget of time for one day into a concrete,
//! per-task allocation, and applies a worked day back onto task state.
//! Every operation is available through the standalone `dayplan` CLI,
//! which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Planner**: the daily plan allocation engine (scoring, allocation,
//!   drift correction, overload detection, plan assembly, progress)
//! - **Storage**: SQLite-based task and daily context storage and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`generate_daily_plan`]: Build today's [`PlanResult`] from a [`PlanStore`]
//! - [`apply_plan_progress`]: Apply a worked plan back onto tasks
//! - [`PlannerDb`]: Task and daily context persistence
//! - [`Config`]: Application configuration management

pub mod daily;
pub mod dates;
pub mod error;
pub mod planner;
pub mod storage;
pub mod task;

pub use dates::parse_date;
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use planner::{
    apply_plan_progress, assemble_plan, generate_daily_plan, Allocation, DisplayBand,
    PlanResult, PlannerConfig, ProgressDelta, ScoredTask, WeightTable,
};
pub use storage::{Config, PlanStore, PlannerDb};
pub use daily::DailyContext;
pub use task::{NewTask, Task, TaskId, TaskStatus, TaskUpdate, UserId};
