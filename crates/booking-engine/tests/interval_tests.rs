//! Tests for interval validity and overlap detection.

use booking_engine::{AvailabilityInterval, DayOfWeek, FormatError};

/// Helper to build an interval from a day name and two `HH:MM` strings.
fn interval(day: &str, start: &str, end: &str) -> AvailabilityInterval {
    AvailabilityInterval::parse(day, start, end).unwrap()
}

#[test]
fn start_before_end_is_valid() {
    assert!(interval("monday", "09:00", "10:00").is_valid());
}

#[test]
fn equal_start_and_end_is_invalid() {
    assert!(!interval("monday", "09:00", "09:00").is_valid());
}

#[test]
fn inverted_interval_is_invalid() {
    assert!(!interval("monday", "10:00", "09:00").is_valid());
}

#[test]
fn partially_overlapping_intervals_overlap() {
    // 09:00-10:00 and 09:30-10:30 share 30 minutes
    let a = interval("monday", "09:00", "10:00");
    let b = interval("monday", "09:30", "10:30");
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    // 09:00-10:00 and 10:00-11:00 touch at 10:00 only
    let a = interval("monday", "09:00", "10:00");
    let b = interval("monday", "10:00", "11:00");
    assert!(!a.overlaps(&b), "adjacent intervals (end == start) should not overlap");
    assert!(!b.overlaps(&a));
}

#[test]
fn contained_interval_overlaps() {
    let outer = interval("wednesday", "09:00", "17:00");
    let inner = interval("wednesday", "12:00", "13:00");
    assert!(outer.overlaps(&inner));
    assert!(inner.overlaps(&outer));
}

#[test]
fn identical_intervals_overlap() {
    let a = interval("friday", "09:00", "12:00");
    assert!(a.overlaps(&a));
}

#[test]
fn different_days_never_overlap() {
    let mon = interval("monday", "09:00", "17:00");
    let tue = interval("tuesday", "09:00", "17:00");
    assert!(!mon.overlaps(&tue));
}

#[test]
fn late_evening_does_not_reach_next_morning() {
    // No wrap past midnight: Monday 22:00-23:59 and Tuesday 00:00-01:00 are separate.
    let mon = interval("monday", "22:00", "23:59");
    let tue = interval("tuesday", "00:00", "01:00");
    assert!(!mon.overlaps(&tue));
}

#[test]
fn duration_is_end_minus_start() {
    assert_eq!(interval("monday", "09:15", "10:45").duration_minutes(), 90);
    assert_eq!(interval("monday", "10:00", "09:00").duration_minutes(), 0);
}

#[test]
fn parse_reports_first_bad_component() {
    assert_eq!(
        AvailabilityInterval::parse("someday", "09:00", "10:00"),
        Err(FormatError::InvalidDay("someday".to_string()))
    );
    assert_eq!(
        AvailabilityInterval::parse("monday", "09:00", "25:00"),
        Err(FormatError::InvalidTime("25:00".to_string()))
    );
}

#[test]
fn serializes_with_form_field_names() {
    let a = interval("thursday", "08:00", "12:30");
    let json = serde_json::to_value(a).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"dayOfWeek": "thursday", "startTime": "08:00", "endTime": "12:30"})
    );
    let back: AvailabilityInterval = serde_json::from_value(json).unwrap();
    assert_eq!(back.day_of_week, DayOfWeek::Thursday);
}
