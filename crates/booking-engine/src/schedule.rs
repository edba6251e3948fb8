//! Weekly schedules: one timezone plus the owner's availability intervals.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Field, Violation, Violations};
use crate::format::parse_timezone;
use crate::interval::AvailabilityInterval;
use crate::owner::OwnerId;
use crate::time::DayOfWeek;
use crate::validate::{parse_availability_set, validate_availability_set, RawAvailability};

pub const TIMEZONE_REQUIRED_MESSAGE: &str = "Required";

/// Schedule form payload before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchedule {
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub availabilities: Vec<RawAvailability>,
}

/// A timezone and a conflict-free set of availability intervals.
///
/// Only constructed through [`Schedule::new`] or [`validate_schedule`], so no
/// two intervals on the same day overlap and none is inverted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    timezone: Tz,
    availabilities: Vec<AvailabilityInterval>,
}

impl Schedule {
    /// # Errors
    /// Returns the availability set violations if any interval is inverted or
    /// overlaps another on the same day.
    pub fn new(
        timezone: Tz,
        availabilities: Vec<AvailabilityInterval>,
    ) -> Result<Self, Violations> {
        validate_availability_set(&availabilities)?;
        Ok(Self {
            timezone,
            availabilities,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Intervals in the order they were submitted.
    pub fn availabilities(&self) -> &[AvailabilityInterval] {
        &self.availabilities
    }

    /// Intervals on `day`, earliest first.
    pub fn availabilities_on(&self, day: DayOfWeek) -> Vec<AvailabilityInterval> {
        let mut intervals: Vec<AvailabilityInterval> = self
            .availabilities
            .iter()
            .filter(|a| a.day_of_week == day)
            .copied()
            .collect();
        intervals.sort_by_key(|a| a.start);
        intervals
    }

    /// All seven days, Monday first, each with its intervals sorted by start.
    pub fn by_day(&self) -> Vec<(DayOfWeek, Vec<AvailabilityInterval>)> {
        DayOfWeek::ALL
            .into_iter()
            .map(|day| (day, self.availabilities_on(day)))
            .collect()
    }

    /// Total bookable minutes per week.
    pub fn weekly_minutes(&self) -> u32 {
        self.availabilities
            .iter()
            .map(|a| u32::from(a.duration_minutes()))
            .sum()
    }
}

/// A schedule as stored for its owner. At most one exists per owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: Uuid,
    pub owner_id: OwnerId,
    #[serde(flatten)]
    pub schedule: Schedule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validate a schedule form payload.
///
/// The timezone must be present and known to the IANA database; the
/// availability rows go through [`parse_availability_set`]. Violations from
/// both are returned together.
///
/// # Errors
/// Returns every violation found.
pub fn validate_schedule(raw: &RawSchedule) -> Result<Schedule, Violations> {
    let mut violations = Violations::new();

    let timezone = if raw.timezone.is_empty() {
        violations.push(Violation::new(Field::Timezone, TIMEZONE_REQUIRED_MESSAGE));
        None
    } else {
        match parse_timezone(&raw.timezone) {
            Ok(tz) => Some(tz),
            Err(err) => {
                violations.push(Violation::new(Field::Timezone, err.to_string()));
                None
            }
        }
    };

    let availabilities = match parse_availability_set(&raw.availabilities) {
        Ok(intervals) => Some(intervals),
        Err(set_violations) => {
            violations.extend(set_violations);
            None
        }
    };

    match (timezone, availabilities) {
        (Some(timezone), Some(availabilities)) if violations.is_empty() => Ok(Schedule {
            timezone,
            availabilities,
        }),
        _ => Err(violations),
    }
}
