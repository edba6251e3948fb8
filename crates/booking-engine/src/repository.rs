//! Owner-scoped persistence port.
//!
//! [`EventRepository`] and [`ScheduleRepository`] define how validated records
//! are stored. Every operation is filtered by the acting [`OwnerId`]; an update
//! or delete that matches zero rows reports
//! [`RepositoryError::NotFoundOrUnauthorized`] without saying which.
//!
//! [`InMemoryRepository`] implements both ports over process memory.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::event::{EventRecord, EventType};
use crate::owner::OwnerId;
use crate::schedule::{Schedule, ScheduleRecord};

/// Storage for event types.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All event types belonging to `owner`, in no particular order.
    async fn list_events(&self, owner: &OwnerId) -> Result<Vec<EventRecord>, RepositoryError>;

    async fn find_event(
        &self,
        id: Uuid,
        owner: &OwnerId,
    ) -> Result<Option<EventRecord>, RepositoryError>;

    /// Store a new event type. The repository assigns the id and timestamps.
    async fn insert_event(
        &self,
        owner: &OwnerId,
        event: EventType,
    ) -> Result<EventRecord, RepositoryError>;

    /// Replace the fields of the event `(id, owner)`.
    async fn update_event(
        &self,
        id: Uuid,
        owner: &OwnerId,
        event: EventType,
    ) -> Result<EventRecord, RepositoryError>;

    async fn delete_event(&self, id: Uuid, owner: &OwnerId) -> Result<(), RepositoryError>;
}

/// Storage for schedules, one per owner.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_schedule(&self, owner: &OwnerId)
        -> Result<Option<ScheduleRecord>, RepositoryError>;

    /// Create the owner's schedule, or atomically replace its timezone and
    /// full availability set. The id and creation time survive replacement.
    async fn upsert_schedule(
        &self,
        owner: &OwnerId,
        schedule: Schedule,
    ) -> Result<ScheduleRecord, RepositoryError>;

    /// Remove the owner's schedule together with its intervals.
    async fn delete_schedule(&self, owner: &OwnerId) -> Result<(), RepositoryError>;
}

/// Process-local adapter for both ports.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    events: Mutex<HashMap<Uuid, EventRecord>>,
    schedules: Mutex<HashMap<OwnerId, ScheduleRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex.lock().map_err(|e| RepositoryError::Backend {
        message: format!("lock poisoned: {}", e),
    })
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn list_events(&self, owner: &OwnerId) -> Result<Vec<EventRecord>, RepositoryError> {
        let events = lock(&self.events)?;
        Ok(events
            .values()
            .filter(|r| &r.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn find_event(
        &self,
        id: Uuid,
        owner: &OwnerId,
    ) -> Result<Option<EventRecord>, RepositoryError> {
        let events = lock(&self.events)?;
        Ok(events.get(&id).filter(|r| &r.owner_id == owner).cloned())
    }

    async fn insert_event(
        &self,
        owner: &OwnerId,
        event: EventType,
    ) -> Result<EventRecord, RepositoryError> {
        let now = Utc::now();
        let record = EventRecord {
            id: Uuid::new_v4(),
            owner_id: owner.clone(),
            event,
            created_at: now,
            updated_at: now,
        };
        lock(&self.events)?.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_event(
        &self,
        id: Uuid,
        owner: &OwnerId,
        event: EventType,
    ) -> Result<EventRecord, RepositoryError> {
        let mut events = lock(&self.events)?;
        let record = events
            .get_mut(&id)
            .filter(|r| &r.owner_id == owner)
            .ok_or(RepositoryError::NotFoundOrUnauthorized)?;
        record.event = event;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_event(&self, id: Uuid, owner: &OwnerId) -> Result<(), RepositoryError> {
        let mut events = lock(&self.events)?;
        match events.get(&id) {
            Some(record) if &record.owner_id == owner => {
                events.remove(&id);
                Ok(())
            }
            _ => Err(RepositoryError::NotFoundOrUnauthorized),
        }
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryRepository {
    async fn find_schedule(
        &self,
        owner: &OwnerId,
    ) -> Result<Option<ScheduleRecord>, RepositoryError> {
        Ok(lock(&self.schedules)?.get(owner).cloned())
    }

    async fn upsert_schedule(
        &self,
        owner: &OwnerId,
        schedule: Schedule,
    ) -> Result<ScheduleRecord, RepositoryError> {
        let now = Utc::now();
        let mut schedules = lock(&self.schedules)?;
        let record = schedules
            .entry(owner.clone())
            .and_modify(|r| {
                r.schedule = schedule.clone();
                r.updated_at = now;
            })
            .or_insert_with(|| ScheduleRecord {
                id: Uuid::new_v4(),
                owner_id: owner.clone(),
                schedule,
                created_at: now,
                updated_at: now,
            });
        Ok(record.clone())
    }

    async fn delete_schedule(&self, owner: &OwnerId) -> Result<(), RepositoryError> {
        lock(&self.schedules)?
            .remove(owner)
            .map(|_| ())
            .ok_or(RepositoryError::NotFoundOrUnauthorized)
    }
}
