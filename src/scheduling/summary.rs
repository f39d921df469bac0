use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::{SchedulingError, SchedulingResult};
use super::proposal::{ConversionResult, MeetingProposal};

/// Clock style used when rendering times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `Jun 1, 2024 at 9:00 AM`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `Jun 1, 2024 at 09:00`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    /// Parses `"12h"` or `"24h"` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "12h" => Some(Self::TwelveHour),
            "24h" => Some(Self::TwentyFourHour),
            _ => None,
        }
    }

    /// Medium date, short time.
    pub fn render(&self, local: &NaiveDateTime) -> String {
        match self {
            Self::TwelveHour => local.format("%b %-d, %Y at %-I:%M %p").to_string(),
            Self::TwentyFourHour => local.format("%b %-d, %Y at %H:%M").to_string(),
        }
    }
}

/// Renders the shareable meeting summary.
///
/// One header line, the organizer's line, then one line per participant in
/// proposal order. Fails when a participant has no entry in `conversions`.
pub fn format_summary(
    proposal: &MeetingProposal,
    conversions: &[ConversionResult],
    time_format: TimeFormat,
) -> SchedulingResult<String> {
    let organizer = proposal.organizer_timezone();
    let mut summary = String::from("Meeting Proposal:\n");
    summary.push_str(&format!(
        "User Timezone ({}): {}\n",
        organizer.label(),
        time_format.render(&proposal.organizer_local_time())
    ));

    for zone in proposal.participant_timezones() {
        let conversion = conversions
            .iter()
            .find(|c| c.timezone == *zone)
            .ok_or_else(|| SchedulingError::MissingConversion(zone.name().to_string()))?;
        summary.push_str(&format!(
            "Teammate Timezone ({}): {}\n",
            zone.label(),
            time_format.render(&conversion.local_time)
        ));
    }

    Ok(summary)
}
