//! Bookable event types.
//!
//! [`validate_event_type`] turns the raw form payload into an [`EventType`],
//! coercing the duration the way a loosely typed form submits it (number,
//! numeric string, bool). [`EventRecord`] is the persisted, owner-scoped row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Field, Violation, Violations};
use crate::format::format_duration;
use crate::owner::OwnerId;

/// Minimum name length, counted in UTF-16 code units like a browser form.
pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_DURATION_MINUTES: u16 = 12 * 60;

pub const NAME_MESSAGE: &str = "Event name must be at least 2 characters.";
pub const DURATION_NAN_MESSAGE: &str = "Expected number, received nan";
pub const DURATION_FLOAT_MESSAGE: &str = "Expected integer, received float";
pub const DURATION_POSITIVE_MESSAGE: &str = "Duration must be greater than 0.";
pub const DURATION_MAX_MESSAGE: &str = "Duration must be less than 12 hours (720 minutes).";

/// Event form payload before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventType {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `true` when absent.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// `None` when the field is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_in_minutes: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Event length in minutes, `1..=720`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct EventDuration(u16);

impl EventDuration {
    /// # Errors
    /// Returns a `durationInMinutes` violation for `0` or anything above 720.
    pub fn new(minutes: u16) -> Result<Self, Violation> {
        if minutes == 0 {
            return Err(Violation::new(Field::DurationInMinutes, DURATION_POSITIVE_MESSAGE));
        }
        if minutes > MAX_DURATION_MINUTES {
            return Err(Violation::new(Field::DurationInMinutes, DURATION_MAX_MESSAGE));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Human-readable form, e.g. `"1 hr 30 mins"`.
    pub fn label(self) -> String {
        format_duration(u32::from(self.0))
    }
}

impl TryFrom<u16> for EventDuration {
    type Error = Violation;

    fn try_from(minutes: u16) -> Result<Self, Violation> {
        Self::new(minutes)
    }
}

impl From<EventDuration> for u16 {
    fn from(d: EventDuration) -> Self {
        d.0
    }
}

/// A validated bookable meeting template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "durationInMinutes")]
    pub duration: EventDuration,
    pub is_active: bool,
}

impl EventType {
    pub fn duration_label(&self) -> String {
        self.duration.label()
    }
}

/// An event type as stored for its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: Uuid,
    pub owner_id: OwnerId,
    #[serde(flatten)]
    pub event: EventType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    /// Inactive events stay stored but are hidden from public booking.
    pub fn is_bookable(&self) -> bool {
        self.event.is_active
    }
}

/// Validate an event form payload.
///
/// Rules:
/// - `name` has at least [`MIN_NAME_CHARS`] UTF-16 code units;
/// - `durationInMinutes` coerces to an integer in `1..=720`;
/// - `isActive` defaults to `true`;
/// - a blank description is stored as absent.
///
/// # Errors
/// Returns every violation found across all fields.
pub fn validate_event_type(raw: &RawEventType) -> Result<EventType, Violations> {
    let mut violations = Violations::new();

    if raw.name.encode_utf16().count() < MIN_NAME_CHARS {
        violations.push(Violation::new(Field::Name, NAME_MESSAGE));
    }

    let duration = match check_duration(raw.duration_in_minutes.as_ref()) {
        Ok(duration) => Some(duration),
        Err(duration_violations) => {
            violations.extend(duration_violations);
            None
        }
    };

    match duration {
        Some(duration) if violations.is_empty() => Ok(EventType {
            name: raw.name.clone(),
            description: raw.description.clone().filter(|d| !d.is_empty()),
            duration,
            is_active: raw.is_active.unwrap_or(true),
        }),
        _ => Err(violations),
    }
}

fn check_duration(value: Option<&Value>) -> Result<EventDuration, Violations> {
    let minutes = coerce_number(value);
    let mut violations = Violations::new();
    let mut violate = |message: &'static str| {
        violations.push(Violation::new(Field::DurationInMinutes, message));
    };

    if minutes.is_nan() {
        violate(DURATION_NAN_MESSAGE);
        return Err(violations);
    }
    if minutes.fract() != 0.0 {
        violate(DURATION_FLOAT_MESSAGE);
    }
    if minutes <= 0.0 {
        violate(DURATION_POSITIVE_MESSAGE);
    }
    if minutes > f64::from(MAX_DURATION_MINUTES) {
        violate(DURATION_MAX_MESSAGE);
    }

    if !violations.is_empty() {
        return Err(violations);
    }
    // Integral and within 1..=720 at this point.
    EventDuration::new(minutes as u16).map_err(Violations::from)
}

/// Loose numeric coercion: numbers pass through, strings are trimmed and
/// parsed (blank is zero), booleans are 0/1, `null` is zero, anything else
/// (including an absent field) is NaN.
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => coerce_str(s.trim()),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

/// Only the literal `Infinity` spelling is infinite; `inf`, `nan` and other
/// words that `f64::from_str` accepts are NaN.
fn coerce_str(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if unsigned == "Infinity" {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}
