use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Most participant zones accepted in one selection.
pub const MAX_PARTICIPANTS: usize = 50;
/// Longest reminder lead time (one week).
pub const MAX_LEAD_MINUTES: i64 = 7 * 24 * 60;
/// Longest calendar entry (one day).
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

pub fn validate_configuration_name(name: &str) -> Result<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(anyhow!("Configuration name cannot be empty"));
    }

    if name.chars().count() > 100 {
        return Err(anyhow!("Configuration name cannot be longer than 100 characters"));
    }

    if name.contains('\n') || name.contains('\r') {
        return Err(anyhow!("Configuration name cannot contain line breaks"));
    }

    Ok(())
}

pub fn validate_entry_title(title: &str) -> Result<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(anyhow!("Title cannot be empty"));
    }

    if title.chars().count() > 200 {
        return Err(anyhow!("Title cannot be longer than 200 characters"));
    }

    if title.contains('\n') || title.contains('\r') {
        return Err(anyhow!("Title cannot contain line breaks"));
    }

    Ok(())
}

pub fn validate_participant_count(count: usize) -> Result<()> {
    if count > MAX_PARTICIPANTS {
        return Err(anyhow!("Cannot have more than {} participant timezones", MAX_PARTICIPANTS));
    }
    Ok(())
}

pub fn validate_lead_minutes(minutes: i64) -> Result<()> {
    if minutes < 0 {
        return Err(anyhow!("Reminder lead time cannot be negative"));
    }
    if minutes > MAX_LEAD_MINUTES {
        return Err(anyhow!("Reminder lead time cannot exceed {} minutes", MAX_LEAD_MINUTES));
    }
    Ok(())
}

pub fn validate_duration_minutes(minutes: i64) -> Result<()> {
    if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(anyhow!("Duration must be between 1 and {} minutes", MAX_DURATION_MINUTES));
    }
    Ok(())
}

/// The end time and reminder time of an entry must both be representable.
pub fn validate_entry_span(start: DateTime<Utc>, duration_minutes: i64, lead_minutes: Option<i64>) -> Result<()> {
    let ends = start.checked_add_signed(Duration::minutes(duration_minutes)).is_some();
    let reminds = lead_minutes
        .map(|lead| start.checked_sub_signed(Duration::minutes(lead)).is_some())
        .unwrap_or(true);
    if !ends || !reminds {
        return Err(anyhow!("Start time {} is out of range", start));
    }
    Ok(())
}

pub fn validate_record_id(id: &str) -> Result<()> {
    Uuid::parse_str(id.trim())
        .map(|_| ())
        .map_err(|_| anyhow!("Invalid id '{}'", id.trim()))
}
