//! Display formatting -- event durations and timezone offset labels.
//!
//! Offsets are resolved through the IANA database shipped with `chrono-tz`, so
//! labels follow daylight-saving rules for the instant being formatted.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{FormatError, Result};

/// Render a duration in minutes as `"1 hr 30 mins"`.
///
/// The hour part is omitted when it is zero, as is the minute part. Each unit
/// is pluralized independently. `0` renders as an empty string.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rem = minutes % 60;

    let hours_str = (hours > 0).then(|| format!("{} hr{}", hours, plural(hours)));
    let minutes_str = (rem > 0).then(|| format!("{} min{}", rem, plural(rem)));

    match (hours_str, minutes_str) {
        (Some(h), Some(m)) => format!("{} {}", h, m),
        (Some(h), None) => h,
        (None, Some(m)) => m,
        (None, None) => String::new(),
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse an IANA timezone identifier (e.g., "America/Los_Angeles").
///
/// # Errors
/// Returns `FormatError::InvalidTimezone` if the identifier is not in the
/// timezone database.
pub fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| FormatError::InvalidTimezone(timezone.to_string()))
}

/// Short UTC offset label for `timezone` right now, e.g. `"+2"` or `"-5:30"`.
pub fn format_timezone_offset(timezone: &str) -> Result<String> {
    format_timezone_offset_at(timezone, Utc::now())
}

/// Short UTC offset label for `timezone` at `instant`.
///
/// # Errors
/// Returns `FormatError::InvalidTimezone` for an unknown identifier.
pub fn format_timezone_offset_at(timezone: &str, instant: DateTime<Utc>) -> Result<String> {
    let tz = parse_timezone(timezone)?;
    Ok(offset_label(tz, instant))
}

/// Offset label for an already-parsed zone.
///
/// Hours are unpadded and minutes only appear when non-zero: `+5:45`, `-3`.
/// UTC itself renders as `+0`.
pub fn offset_label(tz: Tz, instant: DateTime<Utc>) -> String {
    let seconds = tz
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let total_minutes = seconds.abs() / 60;
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);

    if minutes == 0 {
        format!("{}{}", sign, hours)
    } else {
        format!("{}{}:{:02}", sign, hours, minutes)
    }
}

/// One selectable entry in a timezone picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimezoneOption {
    pub name: &'static str,
    pub offset: String,
}

/// Every known IANA zone with its offset label at `instant`, sorted by name.
pub fn timezone_options(instant: DateTime<Utc>) -> Vec<TimezoneOption> {
    let mut options: Vec<TimezoneOption> = chrono_tz::TZ_VARIANTS
        .iter()
        .filter(|tz| is_listed_zone(tz.name()))
        .map(|tz| TimezoneOption {
            name: tz.name(),
            offset: offset_label(*tz, instant),
        })
        .collect();
    options.sort_by(|a, b| a.name.cmp(b.name));
    options
}

/// Geographic areas of the IANA database. Zones outside them (`US/Eastern`,
/// `Etc/GMT+5`, bare legacy names such as `EST5EDT`) are aliases and stay
/// parseable, but are left out of the picker.
const LISTED_AREAS: [&str; 10] = [
    "Africa/",
    "America/",
    "Antarctica/",
    "Arctic/",
    "Asia/",
    "Atlantic/",
    "Australia/",
    "Europe/",
    "Indian/",
    "Pacific/",
];

fn is_listed_zone(name: &str) -> bool {
    name == "UTC" || LISTED_AREAS.iter().any(|area| name.starts_with(area))
}
