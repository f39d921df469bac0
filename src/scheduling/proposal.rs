use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::SchedulingResult;
use super::timezone::{convert, wall_clock, TimezoneId};
use super::working_hours::{is_conflict, WorkingHoursWindow};

/// A meeting time proposed by an organizer to a set of participant zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingProposal {
    organizer_timezone: TimezoneId,
    participant_timezones: Vec<TimezoneId>,
    proposed_instant: DateTime<Utc>,
}

/// One participant's view of a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Participant zone
    pub timezone: TimezoneId,
    /// Offset-adjusted instant returned by the converter
    pub local_instant: DateTime<Utc>,
    /// Participant wall-clock time
    pub local_time: NaiveDateTime,
    /// Whether `local_time` falls outside working hours
    pub in_conflict: bool,
}

impl MeetingProposal {
    /// Builds a proposal. Participants keep first-insertion order, duplicates
    /// are dropped and the organizer's own zone is never listed.
    pub fn new<I>(organizer_timezone: TimezoneId, participants: I, proposed_instant: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = TimezoneId>,
    {
        Self {
            organizer_timezone,
            participant_timezones: dedup_participants(Some(organizer_timezone), participants),
            proposed_instant,
        }
    }

    /// Builds a proposal from raw identifiers, failing on the first one that
    /// does not resolve.
    pub fn from_names<S: AsRef<str>>(
        organizer: &str,
        participants: &[S],
        proposed_instant: DateTime<Utc>,
    ) -> SchedulingResult<Self> {
        let organizer = TimezoneId::parse(organizer)?;
        let participants = participants
            .iter()
            .map(|name| TimezoneId::parse(name.as_ref()))
            .collect::<SchedulingResult<Vec<_>>>()?;
        Ok(Self::new(organizer, participants, proposed_instant))
    }

    /// Organizer zone
    pub fn organizer_timezone(&self) -> TimezoneId {
        self.organizer_timezone
    }

    /// Participant zones in insertion order
    pub fn participant_timezones(&self) -> &[TimezoneId] {
        &self.participant_timezones
    }

    /// Absolute meeting instant
    pub fn proposed_instant(&self) -> DateTime<Utc> {
        self.proposed_instant
    }

    /// Organizer's wall-clock time for the meeting
    pub fn organizer_local_time(&self) -> NaiveDateTime {
        wall_clock(self.proposed_instant, self.organizer_timezone)
    }

    /// Converts the proposal into one participant's zone.
    pub fn convert_for(
        &self,
        timezone: TimezoneId,
        window: &WorkingHoursWindow,
    ) -> SchedulingResult<ConversionResult> {
        let local_instant = convert(self.proposed_instant, self.organizer_timezone, timezone)?;
        Ok(ConversionResult {
            timezone,
            local_instant,
            local_time: wall_clock(local_instant, self.organizer_timezone),
            in_conflict: is_conflict(local_instant, self.organizer_timezone, window),
        })
    }

    /// Conversions for every participant, in proposal order.
    pub fn conversions(&self, window: &WorkingHoursWindow) -> SchedulingResult<Vec<ConversionResult>> {
        self.participant_timezones
            .iter()
            .map(|zone| self.convert_for(*zone, window))
            .collect()
    }
}

/// Drops repeated zones, keeping first-insertion order, and the organizer's
/// own zone when one is given.
pub fn dedup_participants<I>(organizer: Option<TimezoneId>, participants: I) -> Vec<TimezoneId>
where
    I: IntoIterator<Item = TimezoneId>,
{
    let mut unique: Vec<TimezoneId> = Vec::new();
    for zone in participants {
        if Some(zone) != organizer && !unique.contains(&zone) {
            unique.push(zone);
        }
    }
    unique
}
