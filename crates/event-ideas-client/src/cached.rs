// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! [`ApiClient`] with cached list reads.
//!
//! List endpoints are served from [`TtlCache`]s. Every successful write
//! made through this client clears all of them, so the writer sees its own
//! change on the next read. Writes from other clients become visible once
//! the TTL expires.

use std::time::Duration;

use event_ideas_core::model::{Event, Participant, ProposalReport, RegisteredEvent, VoteReport};
use tracing::debug;

use crate::{
    api::ApiClient,
    cache::{DEFAULT_TTL, TtlCache},
    error::ClientError
};

/// Caching front of [`ApiClient`].
#[derive(Debug)]
pub struct CachedClient {
    api:          ApiClient,
    events:       TtlCache<(), Vec<Event>>,
    registered:   TtlCache<(), Vec<RegisteredEvent>>,
    voters:       TtlCache<(), Vec<String>>,
    participants: TtlCache<i64, Vec<Participant>>
}

impl CachedClient {
    /// Wrap `api` with the default ten second TTL.
    pub fn new(api: ApiClient) -> Self {
        Self::with_ttl(api, DEFAULT_TTL)
    }

    /// Wrap `api` with a custom TTL.
    pub fn with_ttl(api: ApiClient, ttl: Duration) -> Self {
        Self {
            api,
            events: TtlCache::new(ttl),
            registered: TtlCache::new(ttl),
            voters: TtlCache::new(ttl),
            participants: TtlCache::new(ttl)
        }
    }

    /// Uncached client. Writes made through it leave the cache as is.
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Drop every cached list.
    pub async fn invalidate(&self) {
        self.events.invalidate_all().await;
        self.registered.invalidate_all().await;
        self.voters.invalidate_all().await;
        self.participants.invalidate_all().await;
        debug!("client cache invalidated");
    }

    async fn after_write<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if result.is_ok() {
            self.invalidate().await;
        }
        result
    }

    /// Cached `GET /events/`.
    ///
    /// # Errors
    ///
    /// [`ClientError`] when a refetch fails.
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.events
            .get_or_try_insert_with((), || self.api.list_events())
            .await
    }

    /// Cached `GET /events/registered/`.
    ///
    /// # Errors
    ///
    /// [`ClientError`] when a refetch fails.
    pub async fn list_registered_events(&self) -> Result<Vec<RegisteredEvent>, ClientError> {
        self.registered
            .get_or_try_insert_with((), || self.api.list_registered_events())
            .await
    }

    /// Cached `GET /events/participants/unique`.
    ///
    /// # Errors
    ///
    /// [`ClientError`] when a refetch fails.
    pub async fn unique_participant_names(&self) -> Result<Vec<String>, ClientError> {
        self.voters
            .get_or_try_insert_with((), || self.api.unique_participant_names())
            .await
    }

    /// Cached `GET /events/{id}/participants`.
    ///
    /// # Errors
    ///
    /// [`ClientError`] when a refetch fails.
    pub async fn list_participants(&self, event_id: i64) -> Result<Vec<Participant>, ClientError> {
        self.participants
            .get_or_try_insert_with(event_id, || self.api.list_participants(event_id))
            .await
    }

    /// Create an event, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::create_event`].
    pub async fn create_event(&self, name: &str) -> Result<Event, ClientError> {
        self.after_write(self.api.create_event(name).await).await
    }

    /// Rename an event, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::update_event`].
    pub async fn update_event(&self, id: i64, name: &str) -> Result<Event, ClientError> {
        self.after_write(self.api.update_event(id, name).await).await
    }

    /// Delete an event, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::delete_event`].
    pub async fn delete_event(&self, id: i64) -> Result<(), ClientError> {
        self.after_write(self.api.delete_event(id).await.map(drop))
            .await
    }

    /// Vote for one event, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::register_participant`].
    pub async fn register_participant(
        &self,
        event_id: i64,
        name: &str
    ) -> Result<Participant, ClientError> {
        self.after_write(self.api.register_participant(event_id, name).await)
            .await
    }

    /// Rename a vote, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::update_participant`].
    pub async fn update_participant(
        &self,
        registration_id: i64,
        name: &str
    ) -> Result<Participant, ClientError> {
        self.after_write(self.api.update_participant(registration_id, name).await)
            .await
    }

    /// Withdraw a vote, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::delete_participant`].
    pub async fn delete_participant(&self, registration_id: i64) -> Result<(), ClientError> {
        self.after_write(self.api.delete_participant(registration_id).await.map(drop))
            .await
    }

    /// Publish an event, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::register_event_creation`].
    pub async fn register_event_creation(
        &self,
        event_id: i64,
        event_name: &str,
        created_by: &str
    ) -> Result<RegisteredEvent, ClientError> {
        let result = self
            .api
            .register_event_creation(event_id, event_name, created_by)
            .await;
        self.after_write(result).await
    }

    /// Delete a publication record, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::delete_registered_event`].
    pub async fn delete_registered_event(&self, id: i64) -> Result<(), ClientError> {
        self.after_write(self.api.delete_registered_event(id).await.map(drop))
            .await
    }

    /// Propose an idea, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::propose_idea`].
    pub async fn propose_idea(
        &self,
        event_name: &str,
        proposer_name: &str,
        also_vote_for: &[i64]
    ) -> Result<ProposalReport, ClientError> {
        let result = self
            .api
            .propose_idea(event_name, proposer_name, also_vote_for)
            .await;
        self.after_write(result).await
    }

    /// Vote for several events, then invalidate.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::cast_votes`].
    pub async fn cast_votes(
        &self,
        participant_name: &str,
        event_ids: &[i64]
    ) -> Result<VoteReport, ClientError> {
        self.after_write(self.api.cast_votes(participant_name, event_ids).await)
            .await
    }
}
