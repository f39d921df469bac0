#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, Timelike};
use timesync::scheduling::{
    is_valid_identifier, region::region_label, timezone::search, TimezoneId, WorkingHoursWindow,
};
use timesync::utils::datetime::{parse_day, parse_local_datetime};
use timesync::utils::validation::*;

#[test]
fn test_identifier_validation() {
    assert!(is_valid_identifier("America/New_York"));
    assert!(is_valid_identifier("UTC"));
    assert!(!is_valid_identifier("Mars/Colony"));
    assert!(!is_valid_identifier(""));
    assert!(TimezoneId::parse("Mars/Colony").is_err());
}

#[test]
fn test_region_labels() {
    assert_eq!(region_label("America/New_York"), "United States");
    assert_eq!(region_label("Asia/Kolkata"), "India");
    assert_eq!(region_label("Europe/London"), "United Kingdom");
    assert_eq!(TimezoneId::parse("Asia/Kolkata").unwrap().label(), "India");
}

#[test]
fn test_search_matches_names_and_labels() {
    let by_name = search("kolkata");
    assert!(by_name.iter().any(|zone| zone.name() == "Asia/Kolkata"));

    let by_label = search("india");
    assert!(by_label.iter().any(|zone| zone.name() == "Asia/Kolkata"));

    assert!(search("no-such-place").is_empty());
}

#[test]
fn test_working_hours_window_validation() {
    assert!(WorkingHoursWindow::new(9, 17).is_ok());
    assert!(WorkingHoursWindow::new(0, 23).is_ok());
    assert!(WorkingHoursWindow::new(17, 9).is_err());
    assert!(WorkingHoursWindow::new(9, 9).is_err());
    assert!(WorkingHoursWindow::new(9, 24).is_err());
}

#[test]
fn test_local_time_formats() {
    for input in ["2024-06-01T09:00", "2024-06-01T09:00:00", "2024-06-01 09:00", " 2024-06-01 09:00:00 "] {
        let parsed = parse_local_datetime(input).unwrap();
        assert_eq!(parsed.hour(), 9);
    }
    assert!(parse_local_datetime("June 1st").is_err());
    assert!(parse_local_datetime("2024-06-01T25:00").is_err());
}

#[test]
fn test_day_format() {
    assert_eq!(parse_day("2024-06-01").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert!(parse_day("06/01/2024").is_err());
}

#[test]
fn test_request_limits() {
    assert!(validate_participant_count(MAX_PARTICIPANTS).is_ok());
    assert!(validate_participant_count(MAX_PARTICIPANTS + 1).is_err());
    assert!(validate_configuration_name("Core team").is_ok());
    assert!(validate_configuration_name("   ").is_err());

    let error = validate_lead_minutes(-1).unwrap_err().to_string();
    assert!(error.contains("cannot be negative"));
}
