//! Error types for booking-engine operations.
//!
//! Parsing failures are [`FormatError`]s. Rule failures are never raised one at
//! a time: they are collected as [`Violation`]s into a [`Violations`] list so a
//! form can show every problem at once.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid day of week: {0}")]
    InvalidDay(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;

/// The input field a [`Violation`] is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Description,
    DurationInMinutes,
    Timezone,
    DayOfWeek,
    StartTime,
    EndTime,
}

impl Field {
    /// Form field name, as sent by the client.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::DurationInMinutes => "durationInMinutes",
            Field::Timezone => "timezone",
            Field::DayOfWeek => "dayOfWeek",
            Field::StartTime => "startTime",
            Field::EndTime => "endTime",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule failure tied to a field, and to a candidate position when the
/// field belongs to an element of the availability list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Position of the offending availability candidate, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub field: Field,
    pub message: String,
}

impl Violation {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            index: None,
            field,
            message: message.into(),
        }
    }

    pub fn at(index: usize, field: Field, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "availabilities[{}].{}: {}", index, self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Every violation found in one validation pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn extend(&mut self, other: Violations) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations reported against the availability candidate at `index`.
    pub fn at_index(&self, index: usize) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.index == Some(index))
    }

    /// Whether any violation carries exactly this field and message.
    pub fn contains(&self, field: Field, message: &str) -> bool {
        self.0.iter().any(|v| v.field == field && v.message == message)
    }

    /// `Ok(value)` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> std::result::Result<T, Violations> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub(crate) fn sort_by_index(&mut self) {
        // Stable: field-level violations without an index stay first.
        self.0.sort_by_key(|v| v.index);
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Failures reported by repository adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Zero rows matched the `(id, owner)` filter. Missing records and records
    /// owned by someone else are indistinguishable.
    #[error("record not found or not owned by the caller")]
    NotFoundOrUnauthorized,

    #[error("repository backend failed: {message}")]
    Backend { message: String },
}

/// Errors returned by the owner-scoped actions in [`crate::actions`].
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("invalid input: {0}")]
    Invalid(#[from] Violations),

    #[error("record not found or not owned by the caller")]
    NotFoundOrUnauthorized,

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for BookingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFoundOrUnauthorized => BookingError::NotFoundOrUnauthorized,
            other => BookingError::Repository(other),
        }
    }
}
