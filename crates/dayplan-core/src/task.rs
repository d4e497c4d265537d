//! Task types.
//!
//! A task is created `active` with its full remaining minutes. Only the
//! progress step or a manual edit by the owner changes it afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ValidationError};

pub type TaskId = i64;
pub type UserId = i64;

/// Lowest difficulty/importance rating.
pub const MIN_RATING: u8 = 1;
/// Highest difficulty/importance rating.
pub const MAX_RATING: u8 = 3;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Still being worked on (initial state)
    #[default]
    Active,
    /// Remaining minutes reached 0
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TaskStatus::Active),
            "done" => Ok(TaskStatus::Done),
            other => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("expected 'active' or 'done', got '{other}'"),
            }),
        }
    }
}

/// A unit of work owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: String,
    pub course: Option<String>,
    pub due_date: NaiveDate,
    /// 1 (easy) to 3 (hard)
    pub difficulty: u8,
    /// 1 (low) to 3 (high)
    pub importance: u8,
    pub remaining_minutes: u32,
    pub status: TaskStatus,
}

impl Task {
    pub fn is_active(&self) -> bool {
        self.status == TaskStatus::Active
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: String,
    pub course: Option<String>,
    pub due_date: NaiveDate,
    pub difficulty: i64,
    pub importance: i64,
    pub remaining_minutes: i64,
}

impl NewTask {
    /// Trim text fields and clamp ratings and minutes into range.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] if the title is blank.
    pub fn normalized(&self) -> Result<NewTask, ValidationError> {
        Ok(NewTask {
            user_id: self.user_id,
            title: normalize_title(&self.title)?,
            course: normalize_course(self.course.as_deref()),
            due_date: self.due_date,
            difficulty: i64::from(clamp_rating(self.difficulty)),
            importance: i64::from(clamp_rating(self.importance)),
            remaining_minutes: i64::from(clamp_minutes(self.remaining_minutes)),
        })
    }
}

/// Manual edit of a task by its owner. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the course.
    pub course: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
    pub difficulty: Option<i64>,
    pub importance: Option<i64>,
    pub remaining_minutes: Option<i64>,
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Apply this edit to `task`, with the same normalization as creation.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] if the new title is blank.
    pub fn apply_to(&self, task: &mut Task) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            task.title = normalize_title(title)?;
        }
        if let Some(course) = &self.course {
            task.course = normalize_course(course.as_deref());
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(d) = self.difficulty {
            task.difficulty = clamp_rating(d);
        }
        if let Some(i) = self.importance {
            task.importance = clamp_rating(i);
        }
        if let Some(m) = self.remaining_minutes {
            task.remaining_minutes = clamp_minutes(m);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        Ok(())
    }
}

fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingField("title".into()));
    }
    Ok(title.to_string())
}

fn normalize_course(course: Option<&str>) -> Option<String> {
    course
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Clamp a difficulty or importance rating into `1..=3`.
pub fn clamp_rating(value: i64) -> u8 {
    // Fits in u8 after the clamp.
    value.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING)) as u8
}

fn clamp_minutes(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task() -> NewTask {
        NewTask {
            user_id: 1,
            title: "  Essay draft ".into(),
            course: Some("   ".into()),
            due_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            difficulty: 7,
            importance: -2,
            remaining_minutes: -30,
        }
    }

    #[test]
    fn normalized_clamps_and_trims() {
        let task = new_task().normalized().unwrap();
        assert_eq!(task.title, "Essay draft");
        assert_eq!(task.course, None);
        assert_eq!(task.difficulty, 3);
        assert_eq!(task.importance, 1);
        assert_eq!(task.remaining_minutes, 0);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut task = new_task();
        task.title = "   ".into();
        assert!(matches!(
            task.normalized(),
            Err(ValidationError::MissingField(ref f)) if f == "title"
        ));
    }

    #[test]
    fn update_applies_only_given_fields() {
        let mut task = Task {
            id: 4,
            user_id: 1,
            title: "Lab report".into(),
            course: Some("CHEM 101".into()),
            due_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            difficulty: 2,
            importance: 2,
            remaining_minutes: 90,
            status: TaskStatus::Active,
        };
        let update = TaskUpdate {
            importance: Some(9),
            course: Some(None),
            remaining_minutes: Some(45),
            ..TaskUpdate::default()
        };
        update.apply_to(&mut task).unwrap();
        assert_eq!(task.title, "Lab report");
        assert_eq!(task.course, None);
        assert_eq!(task.importance, 3);
        assert_eq!(task.remaining_minutes, 45);
        assert_eq!(task.status, TaskStatus::Active);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("paused".parse::<TaskStatus>().is_err());
    }
}
