//! Availability set validation.
//!
//! Every candidate is compared pairwise against every other candidate. Sets
//! are bounded by seven days times a handful of blocks, so the quadratic scan
//! stays cheap. All violations are collected in one pass and the input is
//! only ever borrowed.

use serde::{Deserialize, Serialize};

use crate::error::{Field, Violation, Violations};
use crate::interval::AvailabilityInterval;
use crate::time::{DayOfWeek, TimeOfDay};

pub const OVERLAP_MESSAGE: &str = "Availability overlaps with another";
pub const INVERTED_MESSAGE: &str = "End time must be after start time";
pub const TIME_FORMAT_MESSAGE: &str = "Time must be in the format HH:MM";
pub const DAY_OF_WEEK_MESSAGE: &str = "Invalid day of week";

/// An availability row exactly as submitted by the schedule form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAvailability {
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl RawAvailability {
    pub fn new(
        day_of_week: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            day_of_week: day_of_week.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl From<&AvailabilityInterval> for RawAvailability {
    fn from(interval: &AvailabilityInterval) -> Self {
        Self::new(
            interval.day_of_week.as_str(),
            interval.start.to_string(),
            interval.end.to_string(),
        )
    }
}

/// Check a set of intervals for inversions and same-day overlaps.
///
/// For every candidate:
/// - an overlap with any other candidate is reported on its `startTime`;
/// - `start >= end` is reported on its `endTime`.
///
/// Both checks run for every candidate, so one candidate may carry both.
///
/// # Errors
/// Returns every violation found, tagged with the candidate's index.
pub fn validate_availability_set(intervals: &[AvailabilityInterval]) -> Result<(), Violations> {
    let candidates: Vec<(usize, AvailabilityInterval)> =
        intervals.iter().copied().enumerate().collect();
    let mut violations = Violations::new();
    check_candidates(&candidates, &mut violations);
    violations.into_result(())
}

/// Parse form rows into intervals, then validate them as a set.
///
/// Rows with a malformed day or time are reported field by field and left out
/// of the overlap scan; the remaining rows are still checked against each
/// other so one submission surfaces every problem. Violations are ordered by
/// candidate index.
///
/// # Errors
/// Returns the combined parse and set violations.
pub fn parse_availability_set(
    rows: &[RawAvailability],
) -> Result<Vec<AvailabilityInterval>, Violations> {
    let mut violations = Violations::new();
    let mut candidates = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let day = row.day_of_week.parse::<DayOfWeek>();
        let start = row.start_time.parse::<TimeOfDay>();
        let end = row.end_time.parse::<TimeOfDay>();

        if day.is_err() {
            violations.push(Violation::at(index, Field::DayOfWeek, DAY_OF_WEEK_MESSAGE));
        }
        if start.is_err() {
            violations.push(Violation::at(index, Field::StartTime, TIME_FORMAT_MESSAGE));
        }
        if end.is_err() {
            violations.push(Violation::at(index, Field::EndTime, TIME_FORMAT_MESSAGE));
        }

        if let (Ok(day), Ok(start), Ok(end)) = (day, start, end) {
            candidates.push((index, AvailabilityInterval::new(day, start, end)));
        }
    }

    check_candidates(&candidates, &mut violations);
    violations.sort_by_index();

    let intervals = candidates.into_iter().map(|(_, interval)| interval).collect();
    violations.into_result(intervals)
}

fn check_candidates(candidates: &[(usize, AvailabilityInterval)], violations: &mut Violations) {
    for (pos, (index, candidate)) in candidates.iter().enumerate() {
        let overlaps = candidates
            .iter()
            .enumerate()
            .any(|(other_pos, (_, other))| other_pos != pos && candidate.overlaps(other));

        if overlaps {
            violations.push(Violation::at(*index, Field::StartTime, OVERLAP_MESSAGE));
        }

        if !candidate.is_valid() {
            violations.push(Violation::at(*index, Field::EndTime, INVERTED_MESSAGE));
        }
    }
}
