//! Weekly availability intervals.
//!
//! An interval is a time-of-day window on one weekday. Two intervals overlap
//! only when they share a day and their open ranges intersect: adjacent
//! intervals (one ends exactly when the other starts) are NOT overlaps.
//! Intervals never wrap past midnight.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{DayOfWeek, TimeOfDay};

/// A single contiguous window on one weekday during which an owner is bookable.
///
/// Construction does not enforce `start < end`: inverted intervals must be
/// representable so the set validator can report them. Use [`is_valid`] or
/// [`crate::validate_availability_set`] before accepting one.
///
/// [`is_valid`]: AvailabilityInterval::is_valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInterval {
    pub day_of_week: DayOfWeek,
    #[serde(rename = "startTime")]
    pub start: TimeOfDay,
    #[serde(rename = "endTime")]
    pub end: TimeOfDay,
}

impl AvailabilityInterval {
    pub fn new(day_of_week: DayOfWeek, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            day_of_week,
            start,
            end,
        }
    }

    /// Parse an interval from its day name and two `HH:MM` strings.
    pub fn parse(day_of_week: &str, start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(day_of_week.parse()?, start.parse()?, end.parse()?))
    }

    /// `true` iff the interval starts strictly before it ends.
    pub fn is_valid(&self) -> bool {
        self.start.to_minutes() < self.end.to_minutes()
    }

    /// `true` iff both intervals fall on the same day and
    /// `self.start < other.end && self.end > other.start`.
    pub fn overlaps(&self, other: &AvailabilityInterval) -> bool {
        self.day_of_week == other.day_of_week
            && self.start.to_minutes() < other.end.to_minutes()
            && self.end.to_minutes() > other.start.to_minutes()
    }

    /// Length of the window in minutes; 0 for an inverted or empty interval.
    pub fn duration_minutes(&self) -> u16 {
        self.end.to_minutes().saturating_sub(self.start.to_minutes())
    }
}
