pub mod config;
pub mod daily;
pub mod plan;
pub mod task;

use chrono::{Local, NaiveDate};
use dayplan_core::{parse_date, Config, UserId};

/// `--user` if given, else the configured default user.
pub fn resolve_user(user: Option<UserId>, config: &Config) -> UserId {
    user.unwrap_or(config.user.default_user_id)
}

/// `--date` if given, else today's local date.
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(d) => Ok(parse_date("date", d)?),
        None => Ok(Local::now().date_naive()),
    }
}
