// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Statements a storage backend runs inside an open transaction.
//!
//! The traits follow the usual repository shape: point lookups return
//! `Option`, deletes return whether a row was removed, and inserts return
//! the stored row with its assigned id and timestamps. Uniqueness and
//! foreign keys are enforced by the backend and surface as
//! [`StoreError::UniqueViolation`] / [`StoreError::ForeignKeyViolation`];
//! callers never pre-check them.
//!
//! | Trait | Table |
//! |-------|-------|
//! | [`EventQueries`] | `events` |
//! | [`RegisteredEventQueries`] | `registered_events` |
//! | [`ParticipantQueries`] | `event_participants` |

use async_trait::async_trait;

use crate::{
    error::StoreError,
    model::{Event, Participant, RegisteredEvent},
    transaction::Transactional
};

/// Names of the unique and foreign key constraints, shared by the
/// migration and the in-memory store.
pub mod constraint {
    /// Unique index on `events.name`.
    pub const EVENT_NAME: &str = "uq_event_name";

    /// Unique index on `registered_events.event_id`.
    pub const REGISTERED_EVENT: &str = "uq_registered_event";

    /// Unique index on `event_participants (event_id, participant_name)`.
    pub const EVENT_PARTICIPANT: &str = "uq_event_participant";

    /// Foreign key `registered_events.event_id -> events.id`.
    pub const REGISTERED_EVENT_FK: &str = "fk_registered_event_event";

    /// Foreign key `event_participants.event_id -> events.id`.
    pub const PARTICIPANT_EVENT_FK: &str = "fk_event_participant_event";
}

/// Statements over `events`.
#[async_trait]
pub trait EventQueries: Send {
    /// Insert an event named `name`.
    async fn insert_event(&mut self, name: &str) -> Result<Event, StoreError>;

    /// Find an event by id.
    async fn find_event(&mut self, id: i64) -> Result<Option<Event>, StoreError>;

    /// All events ordered by id.
    async fn list_events(&mut self) -> Result<Vec<Event>, StoreError>;

    /// Rename an event and bump `updated_at`. `None` if it does not exist.
    async fn rename_event(&mut self, id: i64, name: &str) -> Result<Option<Event>, StoreError>;

    /// Delete an event together with its publication and votes.
    async fn delete_event(&mut self, id: i64) -> Result<bool, StoreError>;
}

/// Statements over `registered_events`.
#[async_trait]
pub trait RegisteredEventQueries: Send {
    /// Publish `event_id` under `name` by `created_by`.
    async fn insert_registered_event(
        &mut self,
        event_id: i64,
        name: &str,
        created_by: &str
    ) -> Result<RegisteredEvent, StoreError>;

    /// Find a publication by its own id.
    async fn find_registered_event(
        &mut self,
        id: i64
    ) -> Result<Option<RegisteredEvent>, StoreError>;

    /// Find the publication of `event_id`.
    async fn find_registered_event_for(
        &mut self,
        event_id: i64
    ) -> Result<Option<RegisteredEvent>, StoreError>;

    /// All publications ordered by name (byte-wise), then id.
    async fn list_registered_events(&mut self) -> Result<Vec<RegisteredEvent>, StoreError>;

    /// Delete a publication. The event itself is kept.
    async fn delete_registered_event(&mut self, id: i64) -> Result<bool, StoreError>;
}

/// Statements over `event_participants`.
#[async_trait]
pub trait ParticipantQueries: Send {
    /// Record a vote of `name` for `event_id`.
    async fn insert_participant(
        &mut self,
        event_id: i64,
        name: &str
    ) -> Result<Participant, StoreError>;

    /// Find a vote by registration id.
    async fn find_participant(&mut self, id: i64) -> Result<Option<Participant>, StoreError>;

    /// Votes for `event_id` ordered by registration id.
    async fn list_participants(&mut self, event_id: i64) -> Result<Vec<Participant>, StoreError>;

    /// Rename a vote. `None` if it does not exist.
    async fn rename_participant(
        &mut self,
        id: i64,
        name: &str
    ) -> Result<Option<Participant>, StoreError>;

    /// Delete a vote.
    async fn delete_participant(&mut self, id: i64) -> Result<bool, StoreError>;

    /// Distinct non-empty voter names across all events, byte-wise ascending.
    async fn unique_participant_names(&mut self) -> Result<Vec<String>, StoreError>;
}

/// Every statement the service runs, as one bound.
pub trait Queries: EventQueries + RegisteredEventQueries + ParticipantQueries {}

impl<T> Queries for T where T: EventQueries + RegisteredEventQueries + ParticipantQueries {}

/// A backend the service can be built on.
pub trait Store: Transactional + 'static {}

impl<S> Store for S where S: Transactional + 'static {}
