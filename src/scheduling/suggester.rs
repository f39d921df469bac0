//! Suggested meeting slots.
//!
//! Candidates are the eight hours starting at the window's opening hour on
//! the organizer's clock. A candidate survives when it sits inside working
//! hours for the organizer and for every participant.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::timezone::{convert, resolve_local, TimezoneId};
use super::working_hours::{is_conflict, WorkingHoursWindow};

/// Number of hourly candidates examined per day.
pub const CANDIDATE_SLOTS: u32 = 8;

/// Result of a suggestion request. Iterating evaluates candidates lazily and
/// may be repeated.
#[derive(Debug, Clone)]
pub struct Suggestions {
    first_candidate: DateTime<Utc>,
    organizer: TimezoneId,
    participants: Vec<TimezoneId>,
    unresolved: Vec<String>,
    window: WorkingHoursWindow,
}

impl Suggestions {
    /// Conflict-free candidates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        (0..CANDIDATE_SLOTS)
            .filter_map(move |offset| {
                self.first_candidate
                    .checked_add_signed(Duration::hours(i64::from(offset)))
            })
            .filter(move |candidate| self.is_viable(*candidate))
    }

    /// Identifiers that could not be resolved. Any entry here rules out
    /// every candidate.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    fn is_viable(&self, candidate: DateTime<Utc>) -> bool {
        if !self.unresolved.is_empty() {
            return false;
        }
        if is_conflict(candidate, self.organizer, &self.window) {
            return false;
        }
        self.participants.iter().all(|zone| {
            matches!(
                convert(candidate, self.organizer, *zone),
                Ok(converted) if !is_conflict(converted, self.organizer, &self.window)
            )
        })
    }
}

impl<'a> IntoIterator for &'a Suggestions {
    type Item = DateTime<Utc>;
    type IntoIter = Box<dyn Iterator<Item = DateTime<Utc>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Suggests meeting slots on `day` for the organizer and participants.
///
/// Never fails on a bad participant identifier; such identifiers are listed
/// in [`Suggestions::unresolved`] and exclude every candidate.
pub fn suggest<S: AsRef<str>>(
    day: NaiveDate,
    organizer: TimezoneId,
    participants: &[S],
    window: &WorkingHoursWindow,
) -> Suggestions {
    let mut resolved = Vec::with_capacity(participants.len());
    let mut unresolved = Vec::new();
    for name in participants {
        match TimezoneId::parse(name.as_ref()) {
            Ok(zone) => resolved.push(zone),
            Err(_) => unresolved.push(name.as_ref().to_string()),
        }
    }

    let opening = NaiveTime::from_hms_opt(window.start_hour(), 0, 0).unwrap_or(NaiveTime::MIN);
    let first_candidate = resolve_local(organizer, day.and_time(opening));

    Suggestions {
        first_candidate,
        organizer,
        participants: resolved,
        unresolved,
        window: *window,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;

    fn zone(name: &str) -> TimezoneId {
        TimezoneId::parse(name).unwrap()
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_no_participants_yields_every_slot() {
        let empty: [&str; 0] = [];
        let slots: Vec<_> = suggest(june_first(), zone("America/New_York"), &empty, &WorkingHoursWindow::default())
            .iter()
            .collect();

        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0], Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap());
        assert_eq!(slots[7], Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_overlap_with_london() {
        // New York 09:00-12:00 maps to London 14:00-17:00
        let suggestions = suggest(
            june_first(),
            zone("America/New_York"),
            &["Europe/London"],
            &WorkingHoursWindow::default(),
        );
        let slots: Vec<_> = suggestions.iter().collect();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap());
        assert_eq!(slots[2], Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_unresolved_participant_excludes_all() {
        let suggestions = suggest(
            june_first(),
            zone("America/New_York"),
            &["Europe/London", "Mars/Colony"],
            &WorkingHoursWindow::default(),
        );

        assert_eq!(suggestions.iter().count(), 0);
        assert_eq!(suggestions.unresolved(), ["Mars/Colony".to_string()]);
    }

    #[test]
    fn test_short_window_limits_organizer_slots() {
        let window = WorkingHoursWindow::new(10, 13).unwrap();
        let empty: [&str; 0] = [];
        let slots: Vec<_> = suggest(june_first(), zone("Europe/Berlin"), &empty, &window).iter().collect();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let suggestions = suggest(
            june_first(),
            zone("Europe/Berlin"),
            &["Europe/London"],
            &WorkingHoursWindow::default(),
        );
        let first: Vec<_> = suggestions.iter().collect();
        let second: Vec<_> = (&suggestions).into_iter().collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
