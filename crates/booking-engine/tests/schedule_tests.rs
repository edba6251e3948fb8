//! Tests for schedule validation and the by-day view.

use booking_engine::schedule::TIMEZONE_REQUIRED_MESSAGE;
use booking_engine::validate::OVERLAP_MESSAGE;
use booking_engine::{
    validate_schedule, AvailabilityInterval, DayOfWeek, Field, RawAvailability, RawSchedule,
    Schedule,
};

fn interval(day: &str, start: &str, end: &str) -> AvailabilityInterval {
    AvailabilityInterval::parse(day, start, end).unwrap()
}

fn raw(timezone: &str, rows: &[(&str, &str, &str)]) -> RawSchedule {
    RawSchedule {
        timezone: timezone.to_string(),
        availabilities: rows
            .iter()
            .map(|&(day, start, end)| RawAvailability::new(day, start, end))
            .collect(),
    }
}

#[test]
fn weekly_minutes_sums_every_interval() {
    let schedule = Schedule::new(
        chrono_tz::Asia::Tokyo,
        vec![
            interval("monday", "09:00", "12:00"),
            interval("monday", "13:00", "17:00"),
            interval("wednesday", "13:00", "17:00"),
        ],
    )
    .unwrap();
    assert_eq!(schedule.weekly_minutes(), 660);
}

#[test]
fn empty_schedule_has_no_weekly_minutes() {
    let schedule = Schedule::new(chrono_tz::UTC, Vec::new()).unwrap();
    assert_eq!(schedule.weekly_minutes(), 0);
    assert!(schedule.by_day().iter().all(|(_, day)| day.is_empty()));
}

#[test]
fn by_day_starts_monday_and_sorts_windows() {
    let schedule = Schedule::new(
        chrono_tz::UTC,
        vec![
            interval("sunday", "10:00", "11:00"),
            interval("monday", "13:00", "14:00"),
            interval("monday", "08:00", "09:00"),
        ],
    )
    .unwrap();
    let days = schedule.by_day();

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].0, DayOfWeek::Monday);
    assert_eq!(days[6].0, DayOfWeek::Sunday);
    assert_eq!(
        days[0].1,
        vec![
            interval("monday", "08:00", "09:00"),
            interval("monday", "13:00", "14:00"),
        ]
    );
    // Submission order is kept on the schedule itself.
    assert_eq!(schedule.availabilities()[0].day_of_week, DayOfWeek::Sunday);
}

#[test]
fn new_rejects_overlapping_intervals() {
    let result = Schedule::new(
        chrono_tz::UTC,
        vec![
            interval("friday", "09:00", "11:00"),
            interval("friday", "10:00", "12:00"),
        ],
    );
    let violations = result.unwrap_err();
    assert_eq!(violations.len(), 2);
    assert!(violations.contains(Field::StartTime, OVERLAP_MESSAGE));
}

#[test]
fn validate_schedule_accepts_known_zone() {
    let schedule =
        validate_schedule(&raw("Europe/Berlin", &[("tuesday", "09:00", "17:00")])).unwrap();
    assert_eq!(schedule.timezone(), chrono_tz::Europe::Berlin);
    assert_eq!(schedule.weekly_minutes(), 480);
}

#[test]
fn missing_timezone_is_required() {
    let violations = validate_schedule(&raw("", &[])).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(violations.contains(Field::Timezone, TIMEZONE_REQUIRED_MESSAGE));
}

#[test]
fn unknown_timezone_and_conflicts_reported_together() {
    let violations = validate_schedule(&raw(
        "Mars/Olympus",
        &[("monday", "09:00", "10:00"), ("monday", "09:30", "10:30")],
    ))
    .unwrap_err();

    assert_eq!(violations.len(), 3);
    assert!(violations.contains(Field::Timezone, "Invalid timezone: Mars/Olympus"));
    assert!(violations.contains(Field::StartTime, OVERLAP_MESSAGE));
}
