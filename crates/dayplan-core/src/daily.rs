//! Per-day time budget reported by the user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::UserId;

/// Today's numbers for one user. At most one exists per (user, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContext {
    pub user_id: UserId,
    pub entry_date: NaiveDate,
    pub available_minutes: u32,
    /// Informational only; the planner does not read it.
    pub energy_level: Option<u8>,
    /// Reserved time that cannot be planned.
    #[serde(default)]
    pub buffer_minutes: u32,
}

impl DailyContext {
    pub fn new(user_id: UserId, entry_date: NaiveDate, available_minutes: u32) -> Self {
        Self {
            user_id,
            entry_date,
            available_minutes,
            energy_level: None,
            buffer_minutes: 0,
        }
    }

    pub fn with_buffer(mut self, buffer_minutes: u32) -> Self {
        self.buffer_minutes = buffer_minutes;
        self
    }

    pub fn with_energy(mut self, energy_level: Option<u8>) -> Self {
        self.energy_level = energy_level;
        self
    }
}
