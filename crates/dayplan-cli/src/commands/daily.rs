//! Daily context commands: how much time is available today.

use clap::Subcommand;
use dayplan_core::{Config, DailyContext, PlanStore, PlannerDb};

use super::{resolve_date, resolve_user};

#[derive(Subcommand)]
pub enum DailyAction {
    /// Set (or replace) the available time for a day
    Set {
        /// Available minutes
        #[arg(long, allow_hyphen_values = true)]
        available: i64,
        /// Reserved buffer minutes that cannot be planned
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        buffer: i64,
        /// Energy level (informational)
        #[arg(long)]
        energy: Option<u8>,
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the available time for a day
    Show {
        /// Date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },
}

fn non_negative(minutes: i64) -> u32 {
    minutes.clamp(0, i64::from(u32::MAX)) as u32
}

pub fn run(action: DailyAction, user: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let user_id = resolve_user(user, &config);
    let db = PlannerDb::open()?;

    match action {
        DailyAction::Set {
            available,
            buffer,
            energy,
            date,
        } => {
            let date = resolve_date(date.as_deref())?;
            let ctx = DailyContext::new(user_id, date, non_negative(available))
                .with_buffer(non_negative(buffer))
                .with_energy(energy);
            db.upsert_daily_context(&ctx)?;
            println!("Daily context saved for {date}");
            println!("{}", serde_json::to_string_pretty(&ctx)?);
        }
        DailyAction::Show { date } => {
            let date = resolve_date(date.as_deref())?;
            match db.get_daily_context(user_id, date)? {
                Some(ctx) => println!("{}", serde_json::to_string_pretty(&ctx)?),
                None => println!("No daily context for {date}"),
            }
        }
    }
    Ok(())
}
