//! Daily plan commands.

use clap::Subcommand;
use dayplan_core::{apply_plan_progress, generate_daily_plan, Config, PlanResult, PlannerDb};

use super::{resolve_date, resolve_user};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Generate and show the plan for a day
    Show {
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Regenerate the plan and apply it as worked
    Apply {
        /// Fraction of the plan actually done (1.0 = all of it)
        #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
        multiplier: f64,
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_plan(plan: &PlanResult) {
    println!("Plan for {}", plan.date);
    println!(
        "  available {} min, buffer {} min, usable {} min, planned {} min{}",
        plan.available_minutes,
        plan.buffer_minutes,
        plan.usable_minutes,
        plan.total_planned_minutes,
        if plan.overloaded { " (overloaded)" } else { "" }
    );
    for alloc in &plan.allocations {
        println!(
            "  [{}] {:<30} due {}  {:>4} min  ({}-{} min)",
            alloc.task_id, alloc.title, alloc.due_date, alloc.minutes, alloc.range_lo, alloc.range_hi
        );
    }
    for message in &plan.messages {
        println!("  * {message}");
    }
}

pub fn run(action: PlanAction, user: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let user_id = resolve_user(user, &config);
    let db = PlannerDb::open()?;

    match action {
        PlanAction::Show { date, json } => {
            let date = resolve_date(date.as_deref())?;
            let plan = generate_daily_plan(&db, user_id, date, &config.planner)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&plan);
            }
        }
        PlanAction::Apply {
            multiplier,
            date,
            json,
        } => {
            let date = resolve_date(date.as_deref())?;
            let plan = generate_daily_plan(&db, user_id, date, &config.planner)?;
            let deltas = apply_plan_progress(&db, user_id, &plan.allocations, multiplier)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&deltas)?);
            } else {
                println!("Progress applied to {} task(s)", deltas.len());
                for d in &deltas {
                    println!(
                        "  [{}] worked {} min, {} -> {} min remaining{}",
                        d.task_id,
                        d.worked_minutes,
                        d.previous_remaining,
                        d.new_remaining,
                        if d.completed { " (done)" } else { "" }
                    );
                }
            }
        }
    }
    Ok(())
}
