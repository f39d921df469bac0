use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::scheduling::timezone::{resolve_local, TimezoneId};

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a wall-clock time such as `2024-06-01T09:00` or `2024-06-01 09:00:00`.
pub fn parse_local_datetime(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| anyhow!("Invalid date/time '{}': expected YYYY-MM-DDTHH:MM", input))
}

/// Parses a wall-clock time and resolves it on `zone`'s clock.
pub fn parse_datetime_in(input: &str, zone: TimezoneId) -> Result<DateTime<Utc>> {
    Ok(resolve_local(zone, parse_local_datetime(input)?))
}

/// Parses a calendar day in `YYYY-MM-DD` form.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid day '{}': expected YYYY-MM-DD", input.trim()))
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%A, %B %d at %I:%M %p UTC").to_string()
}
