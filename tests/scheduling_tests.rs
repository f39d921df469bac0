#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use timesync::scheduling::{
    convert, convert_named, format_summary, is_conflict, suggest, timezone::wall_clock, MeetingProposal,
    SchedulingError, TimeFormat, TimezoneId, WorkingHoursWindow, CANDIDATE_SLOTS,
};
use timesync::utils::datetime::parse_datetime_in;

fn zone(name: &str) -> TimezoneId {
    TimezoneId::parse(name).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn new_york_kolkata(local_time: &str) -> MeetingProposal {
    let instant = parse_datetime_in(local_time, zone("America/New_York")).unwrap();
    MeetingProposal::from_names("America/New_York", &["Asia/Kolkata"], instant).unwrap()
}

#[test]
fn test_round_trip_away_from_dst() {
    let pairs = [
        ("America/New_York", "Asia/Kolkata"),
        ("Europe/Berlin", "Australia/Sydney"),
        ("Asia/Tokyo", "America/Los_Angeles"),
        ("UTC", "Asia/Kathmandu"),
    ];
    let instants = [utc(2024, 6, 1, 13, 0), utc(2024, 1, 15, 8, 45)];

    for (a, b) in pairs {
        for instant in instants {
            let there = convert(instant, zone(a), zone(b)).unwrap();
            assert_eq!(convert(there, zone(b), zone(a)).unwrap(), instant, "{} <-> {} at {}", a, b, instant);
        }
    }
}

#[test]
fn test_round_trip_around_shared_dst_transition() {
    // London and Paris both move their clocks at 01:00Z on 2024-03-31.
    let london = zone("Europe/London");
    let paris = zone("Europe/Paris");
    for minutes in [-90, -30, 0, 30, 90] {
        let instant = utc(2024, 3, 31, 1, 0) + Duration::minutes(minutes);
        let there = convert(instant, london, paris).unwrap();
        assert_eq!(convert(there, paris, london).unwrap(), instant);
    }
}

#[test]
fn test_round_trip_across_transition_is_approximate() {
    // New York springs forward at 07:00Z on 2024-03-10; offsets are taken at
    // each input instant so the trip back is off by the transition.
    let instant = utc(2024, 3, 10, 6, 0);
    let there = convert(instant, zone("America/New_York"), zone("UTC")).unwrap();
    assert_eq!(there, utc(2024, 3, 10, 11, 0));
    assert_eq!(convert(there, zone("UTC"), zone("America/New_York")).unwrap(), utc(2024, 3, 10, 7, 0));
}

#[test]
fn test_identity_law() {
    for name in ["UTC", "America/New_York", "Asia/Kolkata", "Pacific/Chatham", "Europe/London"] {
        for instant in [utc(2024, 3, 10, 7, 0), utc(2024, 11, 3, 6, 0), utc(2024, 6, 1, 0, 0)] {
            assert_eq!(convert(instant, zone(name), zone(name)).unwrap(), instant);
        }
    }
}

#[test]
fn test_is_conflict_is_stable() {
    let window = WorkingHoursWindow::default();
    let frame = zone("America/New_York");
    let instant = utc(2024, 6, 1, 22, 30);
    let first = is_conflict(instant, frame, &window);
    for _ in 0..10 {
        assert_eq!(is_conflict(instant, frame, &window), first);
    }
}

#[test]
fn test_evening_in_kolkata_is_a_conflict() {
    let proposal = new_york_kolkata("2024-06-01T09:00");
    assert_eq!(proposal.proposed_instant(), utc(2024, 6, 1, 13, 0));

    let kolkata = proposal.conversions(&WorkingHoursWindow::default()).unwrap().remove(0);
    assert_eq!(kolkata.timezone, zone("Asia/Kolkata"));
    assert_eq!(
        kolkata.local_time,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(18, 30, 0).unwrap()
    );
    assert_eq!(kolkata.local_time.hour(), 18);
    assert!(kolkata.in_conflict);
}

#[test]
fn test_early_new_york_morning_suits_kolkata() {
    let proposal = new_york_kolkata("2024-06-01T02:00");
    let kolkata = proposal.conversions(&WorkingHoursWindow::default()).unwrap().remove(0);
    assert_eq!((kolkata.local_time.hour(), kolkata.local_time.minute()), (11, 30));
    assert!(!kolkata.in_conflict);
}

#[test]
fn test_summary_for_conflict_scenario() {
    let proposal = new_york_kolkata("2024-06-01T09:00");
    let conversions = proposal.conversions(&WorkingHoursWindow::default()).unwrap();
    let summary = format_summary(&proposal, &conversions, TimeFormat::TwelveHour).unwrap();
    assert_eq!(
        summary,
        "Meeting Proposal:\nUser Timezone (United States): Jun 1, 2024 at 9:00 AM\nTeammate Timezone (India): Jun 1, 2024 at 6:30 PM\n"
    );
}

#[test]
fn test_summary_in_24_hour_format() {
    let proposal = new_york_kolkata("2024-06-01T09:00");
    let conversions = proposal.conversions(&WorkingHoursWindow::default()).unwrap();
    let summary = format_summary(&proposal, &conversions, TimeFormat::TwentyFourHour).unwrap();
    assert!(summary.ends_with("Teammate Timezone (India): Jun 1, 2024 at 18:30\n"));
}

#[test]
fn test_unknown_zone_fails_conversion() {
    let instant = utc(2024, 6, 1, 13, 0);
    assert_eq!(
        convert_named(instant, "Mars/Colony", "Asia/Kolkata"),
        Err(SchedulingError::UnknownTimezone("Mars/Colony".to_string()))
    );
    assert_eq!(
        convert_named(instant, "America/New_York", "Mars/Colony"),
        Err(SchedulingError::UnknownTimezone("Mars/Colony".to_string()))
    );
    assert!(MeetingProposal::from_names("America/New_York", &["Mars/Colony"], instant).is_err());
}

#[test]
fn test_conversion_past_the_last_representable_year_fails() {
    let instant = parse_datetime_in("+262142-12-31T12:00", zone("Pacific/Pago_Pago")).unwrap();
    let proposal = MeetingProposal::from_names("Pacific/Pago_Pago", &["Pacific/Kiritimati"], instant).unwrap();

    assert!(matches!(
        proposal.conversions(&WorkingHoursWindow::default()),
        Err(SchedulingError::OutOfRange(_))
    ));
    assert!(matches!(
        convert(DateTime::<Utc>::MAX_UTC, zone("UTC"), zone("Asia/Kolkata")),
        Err(SchedulingError::OutOfRange(_))
    ));
}

#[test]
fn test_suggest_near_the_end_of_time_does_not_panic() {
    let last_day = NaiveDate::from_ymd_opt(262142, 12, 31).unwrap();
    let suggestions = suggest(
        last_day,
        zone("Pacific/Pago_Pago"),
        &["Pacific/Kiritimati"],
        &WorkingHoursWindow::default(),
    );
    assert_eq!(suggestions.iter().count(), 0);
}

#[test]
fn test_suggest_without_participants_returns_every_slot() {
    let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let organizer = zone("America/New_York");
    let no_participants: [&str; 0] = [];
    let slots: Vec<_> = suggest(day, organizer, &no_participants, &WorkingHoursWindow::default())
        .iter()
        .collect();

    assert_eq!(slots.len(), CANDIDATE_SLOTS as usize);
    let hours: Vec<u32> = slots.iter().map(|slot| wall_clock(*slot, organizer).hour()).collect();
    assert_eq!(hours, vec![9, 10, 11, 12, 13, 14, 15, 16]);
}

#[test]
fn test_suggestions_are_bounded_and_increasing() {
    let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let cases: [(&str, &[&str]); 4] = [
        ("America/New_York", &["Europe/London"]),
        ("Europe/Berlin", &["Europe/London", "Europe/Paris"]),
        ("Asia/Tokyo", &["Australia/Sydney"]),
        ("America/New_York", &["Asia/Kolkata"]),
    ];

    for (organizer, participants) in cases {
        let suggestions = suggest(day, zone(organizer), participants, &WorkingHoursWindow::default());
        let slots: Vec<_> = suggestions.iter().collect();
        assert!(slots.len() <= CANDIDATE_SLOTS as usize);
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn test_suggest_with_unresolvable_participant() {
    let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let suggestions = suggest(
        day,
        zone("America/New_York"),
        &["Europe/London", "Mars/Colony"],
        &WorkingHoursWindow::default(),
    );
    assert_eq!(suggestions.iter().count(), 0);
    assert_eq!(suggestions.unresolved(), ["Mars/Colony".to_string()]);
}
