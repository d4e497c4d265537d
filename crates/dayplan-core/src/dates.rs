//! Calendar date parsing at the storage and CLI boundary.

use chrono::NaiveDate;

use crate::error::{CoreError, Result};

/// Textual form of every date crossing the boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, labelling failures with `field`.
///
/// # Errors
/// Returns [`CoreError::InvalidDate`] if `value` is not a valid calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| CoreError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
        source,
    })
}

/// Format a date for storage.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
