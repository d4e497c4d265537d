//! Task management commands for CLI.

use clap::Subcommand;
use dayplan_core::{parse_date, Config, NewTask, PlanStore, PlannerDb, TaskStatus, TaskUpdate};

use super::resolve_user;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
        /// Course label
        #[arg(long)]
        course: Option<String>,
        /// Difficulty 1-3 (clamped)
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        difficulty: i64,
        /// Importance 1-3 (clamped)
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        importance: i64,
        /// Remaining work in minutes
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        minutes: i64,
    },
    /// List tasks
    List {
        /// Include done tasks
        #[arg(long)]
        all: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: i64,
    },
    /// Update a task
    Update {
        /// Task ID
        id: i64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New course label (empty to clear)
        #[arg(long)]
        course: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// New difficulty
        #[arg(long, allow_hyphen_values = true)]
        difficulty: Option<i64>,
        /// New importance
        #[arg(long, allow_hyphen_values = true)]
        importance: Option<i64>,
        /// New remaining minutes
        #[arg(long, allow_hyphen_values = true)]
        minutes: Option<i64>,
        /// New status (active or done)
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction, user: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let user_id = resolve_user(user, &config);
    let db = PlannerDb::open()?;

    match action {
        TaskAction::Add {
            title,
            due,
            course,
            difficulty,
            importance,
            minutes,
        } => {
            let id = db.create_task(&NewTask {
                user_id,
                title,
                course,
                due_date: parse_date("due", &due)?,
                difficulty,
                importance,
                remaining_minutes: minutes,
            })?;
            let task = db.get_task(id)?.ok_or(format!("Task not found: {id}"))?;
            println!("Task created: {id}");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { all } => {
            let tasks = db.list_tasks(user_id, all)?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => match db.get_task(id)?.filter(|t| t.user_id == user_id) {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => return Err(format!("Task not found: {id}").into()),
        },
        TaskAction::Update {
            id,
            title,
            course,
            due,
            difficulty,
            importance,
            minutes,
            status,
        } => {
            let update = TaskUpdate {
                title,
                course: course.map(Some),
                due_date: due.as_deref().map(|d| parse_date("due", d)).transpose()?,
                difficulty,
                importance,
                remaining_minutes: minutes,
                status,
            };
            let task = db.update_task(user_id, id, &update)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            db.delete_task(user_id, id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
