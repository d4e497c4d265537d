mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, UserConfig};
pub use database::PlannerDb;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::daily::DailyContext;
use crate::error::{ConfigError, Result};
use crate::task::{Task, TaskId, UserId};

/// Storage the planner reads from and writes progress to.
///
/// "Generate plan, then apply progress" is two separate calls, not a
/// transaction: the task set may change in between, and implementors are
/// not expected to lock across them.
pub trait PlanStore {
    fn get_daily_context(&self, user_id: UserId, date: NaiveDate) -> Result<Option<DailyContext>>;

    /// Active tasks ordered by due date ascending, importance descending,
    /// difficulty descending.
    fn list_active_tasks(&self, user_id: UserId) -> Result<Vec<Task>>;

    fn get_task(&self, task_id: TaskId) -> Result<Option<Task>>;

    fn update_task_remaining_minutes(&self, task_id: TaskId, minutes: u32) -> Result<()>;

    fn mark_task_done(&self, task_id: TaskId) -> Result<()>;
}

/// Returns the data directory.
///
/// `DAYPLAN_DATA_DIR` wins if set; otherwise `~/.config/dayplan`, or
/// `~/.config/dayplan-dev` when `DAYPLAN_ENV=dev`. The directory is created
/// if missing.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("DAYPLAN_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
                .join(".config");
            let env = std::env::var("DAYPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dayplan-dev")
            } else {
                base_dir.join("dayplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
