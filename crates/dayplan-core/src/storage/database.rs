//! SQLite-based storage for tasks and daily context.
//!
//! Provides persistent storage for:
//! - Tasks owned by a user
//! - One daily context per (user, date)

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::{data_dir, migrations, PlanStore};
use crate::daily::DailyContext;
use crate::dates::{format_date, parse_date};
use crate::error::{DatabaseError, Result};
use crate::task::{NewTask, Task, TaskId, TaskStatus, TaskUpdate, UserId};

const TASK_COLUMNS: &str =
    "id, user_id, title, course, due_date, difficulty, importance, remaining_minutes, status";

/// Task row as stored, before date and status parsing.
struct TaskRow {
    id: TaskId,
    user_id: UserId,
    title: String,
    course: Option<String>,
    due_date: String,
    difficulty: i64,
    importance: i64,
    remaining_minutes: i64,
    status: String,
}

impl TaskRow {
    fn from_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            course: row.get(3)?,
            due_date: row.get(4)?,
            difficulty: row.get(5)?,
            importance: row.get(6)?,
            remaining_minutes: row.get(7)?,
            status: row.get(8)?,
        })
    }

    fn into_task(self) -> Result<Task> {
        Ok(Task {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            course: self.course,
            due_date: parse_date("due_date", &self.due_date)?,
            // Out-of-range ratings stay out of range so they weigh 1.0.
            difficulty: raw_rating(self.difficulty),
            importance: raw_rating(self.importance),
            remaining_minutes: self.remaining_minutes.clamp(0, i64::from(u32::MAX)) as u32,
            status: self.status.parse::<TaskStatus>()?,
        })
    }
}

/// Ratings that do not fit a `u8` become 0, which is also out of range.
fn raw_rating(value: i64) -> u8 {
    u8::try_from(value).unwrap_or(0)
}

/// SQLite database for planner storage.
pub struct PlannerDb {
    conn: Connection,
}

impl PlannerDb {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/dayplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("dayplan.db"))
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened planner database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // === Tasks ===

    /// Insert a task after normalizing it; returns the new id.
    ///
    /// # Errors
    /// Returns a validation error for a blank title, or a database error.
    pub fn create_task(&self, task: &NewTask) -> Result<TaskId> {
        let task = task.normalized()?;
        self.conn.execute(
            "INSERT INTO tasks (user_id, title, course, due_date, difficulty, importance, remaining_minutes, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'active')",
            params![
                task.user_id,
                task.title,
                task.course,
                format_date(task.due_date),
                task.difficulty,
                task.importance,
                task.remaining_minutes,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(task_id = id, user_id = task.user_id, "created task");
        Ok(id)
    }

    /// All of a user's tasks, active first, in planning order.
    ///
    /// # Errors
    /// Returns an error on query failure or a malformed stored date.
    pub fn list_tasks(&self, user_id: UserId, include_done: bool) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE user_id = ?1 AND (?2 OR status = 'active')
             ORDER BY status = 'done', due_date ASC, importance DESC, difficulty DESC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user_id, include_done], TaskRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Apply a manual edit to a task owned by `user_id`.
    ///
    /// # Errors
    /// Returns [`DatabaseError::TaskNotFound`] if the task does not exist or
    /// belongs to another user.
    pub fn update_task(&self, user_id: UserId, task_id: TaskId, update: &TaskUpdate) -> Result<Task> {
        let mut task = self
            .get_task(task_id)?
            .filter(|t| t.user_id == user_id)
            .ok_or(DatabaseError::TaskNotFound(task_id))?;
        update.apply_to(&mut task)?;
        self.conn.execute(
            "UPDATE tasks SET title = ?1, course = ?2, due_date = ?3, difficulty = ?4,
                 importance = ?5, remaining_minutes = ?6, status = ?7, updated_at = datetime('now')
             WHERE id = ?8",
            params![
                task.title,
                task.course,
                format_date(task.due_date),
                task.difficulty,
                task.importance,
                task.remaining_minutes,
                task.status.as_str(),
                task.id,
            ],
        )?;
        Ok(task)
    }

    /// Delete a task owned by `user_id`.
    ///
    /// # Errors
    /// Returns [`DatabaseError::TaskNotFound`] if nothing was deleted.
    pub fn delete_task(&self, user_id: UserId, task_id: TaskId) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
            params![task_id, user_id],
        )?;
        if deleted == 0 {
            return Err(DatabaseError::TaskNotFound(task_id).into());
        }
        Ok(())
    }

    // === Daily context ===

    /// Insert or replace the daily context for its (user, date).
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn upsert_daily_context(&self, ctx: &DailyContext) -> Result<()> {
        self.conn.execute(
            "INSERT INTO daily_context (user_id, entry_date, available_minutes, energy_level, buffer_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id, entry_date) DO UPDATE SET
                 available_minutes = excluded.available_minutes,
                 energy_level = excluded.energy_level,
                 buffer_minutes = excluded.buffer_minutes",
            params![
                ctx.user_id,
                format_date(ctx.entry_date),
                ctx.available_minutes,
                ctx.energy_level,
                ctx.buffer_minutes,
            ],
        )?;
        Ok(())
    }
}

impl PlanStore for PlannerDb {
    fn get_daily_context(&self, user_id: UserId, date: NaiveDate) -> Result<Option<DailyContext>> {
        let row = self
            .conn
            .query_row(
                "SELECT available_minutes, energy_level, buffer_minutes
                 FROM daily_context WHERE user_id = ?1 AND entry_date = ?2",
                params![user_id, format_date(date)],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, Option<i64>>(1)?,
                        row.get::<_, Option<i64>>(2)?,
                    ))
                },
            )
            .optional()?;

        Ok(row.map(|(available, energy, buffer)| DailyContext {
            user_id,
            entry_date: date,
            available_minutes: available.clamp(0, i64::from(u32::MAX)) as u32,
            energy_level: energy.and_then(|e| u8::try_from(e).ok()),
            buffer_minutes: buffer.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32,
        }))
    }

    fn list_active_tasks(&self, user_id: UserId) -> Result<Vec<Task>> {
        self.list_tasks(user_id, false)
    }

    fn get_task(&self, task_id: TaskId) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        self.conn
            .query_row(&sql, params![task_id], TaskRow::from_row)
            .optional()?
            .map(TaskRow::into_task)
            .transpose()
    }

    fn update_task_remaining_minutes(&self, task_id: TaskId, minutes: u32) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks SET remaining_minutes = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![minutes, task_id],
        )?;
        Ok(())
    }

    fn mark_task_done(&self, task_id: TaskId) -> Result<()> {
        self.conn.execute(
            "UPDATE tasks SET status = 'done', updated_at = datetime('now') WHERE id = ?1",
            params![task_id],
        )?;
        Ok(())
    }
}
