//! Owner-scoped actions: authenticate, validate, then persist.
//!
//! Each action takes the acting identity explicitly. A missing identity is
//! rejected with [`BookingError::AuthenticationRequired`] before the input is
//! looked at; invalid input is rejected with every violation before the
//! repository is touched. Repository failures are passed straight through,
//! nothing is retried.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{BookingError, RepositoryError, Violations};
use crate::event::{validate_event_type, EventRecord, RawEventType};
use crate::owner::OwnerId;
use crate::repository::{EventRepository, ScheduleRepository};
use crate::schedule::{validate_schedule, RawSchedule, ScheduleRecord};

fn require_owner(owner: Option<&OwnerId>) -> Result<&OwnerId, BookingError> {
    owner.ok_or_else(|| {
        debug!("rejecting unauthenticated request");
        BookingError::AuthenticationRequired
    })
}

fn log_rejected(owner: &OwnerId, violations: &Violations) {
    debug!(%owner, violations = violations.len(), "input rejected: {}", violations);
}

fn log_repository_failure(owner: &OwnerId, err: &RepositoryError) {
    match err {
        RepositoryError::NotFoundOrUnauthorized => {
            debug!(%owner, "no record matched the owner scope")
        }
        RepositoryError::Backend { message } => {
            warn!(%owner, %message, "repository operation failed")
        }
    }
}

/// Validate and store a new event type for the acting owner.
pub async fn create_event<R>(
    repo: &R,
    owner: Option<&OwnerId>,
    raw: &RawEventType,
) -> Result<EventRecord, BookingError>
where
    R: EventRepository + ?Sized,
{
    let owner = require_owner(owner)?;
    let event = validate_event_type(raw).inspect_err(|v| log_rejected(owner, v))?;

    let record = repo
        .insert_event(owner, event)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?;

    info!(%owner, event_id = %record.id, "event created");
    Ok(record)
}

/// Validate and apply new fields to an event the acting owner holds.
///
/// # Errors
/// `NotFoundOrUnauthorized` when `id` does not exist or belongs to someone
/// else.
pub async fn update_event<R>(
    repo: &R,
    owner: Option<&OwnerId>,
    id: Uuid,
    raw: &RawEventType,
) -> Result<EventRecord, BookingError>
where
    R: EventRepository + ?Sized,
{
    let owner = require_owner(owner)?;
    let event = validate_event_type(raw).inspect_err(|v| log_rejected(owner, v))?;

    let record = repo
        .update_event(id, owner, event)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?;

    info!(%owner, event_id = %id, "event updated");
    Ok(record)
}

pub async fn delete_event<R>(
    repo: &R,
    owner: Option<&OwnerId>,
    id: Uuid,
) -> Result<(), BookingError>
where
    R: EventRepository + ?Sized,
{
    let owner = require_owner(owner)?;

    repo.delete_event(id, owner)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?;

    info!(%owner, event_id = %id, "event deleted");
    Ok(())
}

/// The acting owner's event types, sorted by name (case-insensitive).
pub async fn list_events<R>(
    repo: &R,
    owner: Option<&OwnerId>,
) -> Result<Vec<EventRecord>, BookingError>
where
    R: EventRepository + ?Sized,
{
    let owner = require_owner(owner)?;
    let mut events = repo
        .list_events(owner)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?;
    events.sort_by_cached_key(|r| r.event.name.to_lowercase());
    Ok(events)
}

/// Active event types of `owner`, as shown on their public booking page.
///
/// No identity is required: anyone may view another owner's bookable events.
pub async fn list_public_events<R>(
    repo: &R,
    owner: &OwnerId,
) -> Result<Vec<EventRecord>, BookingError>
where
    R: EventRepository + ?Sized,
{
    let mut events = repo
        .list_events(owner)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?;
    events.retain(EventRecord::is_bookable);
    events.sort_by_cached_key(|r| r.event.name.to_lowercase());
    Ok(events)
}

/// Validate a schedule and replace the acting owner's schedule with it.
///
/// The first save creates the schedule; later saves replace the timezone and
/// the whole availability set at once.
pub async fn save_schedule<R>(
    repo: &R,
    owner: Option<&OwnerId>,
    raw: &RawSchedule,
) -> Result<ScheduleRecord, BookingError>
where
    R: ScheduleRepository + ?Sized,
{
    let owner = require_owner(owner)?;
    let schedule = validate_schedule(raw).inspect_err(|v| log_rejected(owner, v))?;
    let intervals = schedule.availabilities().len();

    let record = repo
        .upsert_schedule(owner, schedule)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?;

    info!(%owner, schedule_id = %record.id, intervals, "schedule saved");
    Ok(record)
}

pub async fn load_schedule<R>(
    repo: &R,
    owner: Option<&OwnerId>,
) -> Result<Option<ScheduleRecord>, BookingError>
where
    R: ScheduleRepository + ?Sized,
{
    let owner = require_owner(owner)?;
    Ok(repo
        .find_schedule(owner)
        .await
        .inspect_err(|e| log_repository_failure(owner, e))?)
}
