//! # booking-engine
//!
//! Availability validation and event types for a booking service.
//!
//! Owners publish bookable event types and a weekly schedule of availability
//! windows. This crate holds the rules that keep that data consistent: strict
//! `HH:MM` parsing, same-day overlap detection, duration limits, and the
//! display formatting derived from them. Persistence sits behind an
//! owner-scoped repository port.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` time of day and weekdays
//! - [`interval`] — availability intervals with validity and overlap checks
//! - [`validate`] — availability set validation (inversions, overlaps)
//! - [`event`] — event type validation and records
//! - [`schedule`] — schedule validation and records
//! - [`format`] — duration and timezone offset labels
//! - [`owner`] — opaque owner identity
//! - [`repository`] — owner-scoped persistence port and in-memory adapter
//! - [`actions`] — authenticate → validate → persist workflows
//! - [`error`] — Error types

pub mod actions;
pub mod error;
pub mod event;
pub mod format;
pub mod interval;
pub mod owner;
pub mod repository;
pub mod schedule;
pub mod time;
pub mod validate;

pub use error::{BookingError, Field, FormatError, RepositoryError, Violation, Violations};
pub use event::{validate_event_type, EventDuration, EventRecord, EventType, RawEventType};
pub use format::{
    format_duration, format_timezone_offset, format_timezone_offset_at, timezone_options,
    TimezoneOption,
};
pub use interval::AvailabilityInterval;
pub use owner::OwnerId;
pub use repository::{EventRepository, InMemoryRepository, ScheduleRepository};
pub use schedule::{validate_schedule, RawSchedule, Schedule, ScheduleRecord};
pub use time::{DayOfWeek, TimeOfDay};
pub use validate::{parse_availability_set, validate_availability_set, RawAvailability};
