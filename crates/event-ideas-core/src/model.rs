// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Stored entities and the composite results built from them.
//!
//! The serialized field names are the ones the HTTP surface speaks
//! (`event_name`, `participant_name`, ...), so the same types travel from
//! storage to the wire and back into the client without a mapping layer.
//!
//! | Entity | Table | Unique index |
//! |--------|-------|--------------|
//! | [`Event`] | `events` | `name` |
//! | [`RegisteredEvent`] | `registered_events` | `event_id` |
//! | [`Participant`] | `event_participants` | `(event_id, participant_name)` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed event idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct Event {
    /// Storage-assigned identifier.
    pub id: i64,

    /// Trimmed idea name, unique across all events.
    #[serde(rename = "event_name")]
    pub name: String,

    /// Insert timestamp.
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last rename.
    pub updated_at: DateTime<Utc>
}

/// Publication record marking that an [`Event`] was formally proposed.
///
/// At most one exists per event. `name` is a copy of the event name taken
/// at publication time and is not rewritten when the event is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct RegisteredEvent {
    /// Storage-assigned identifier.
    pub id: i64,

    /// The published event.
    pub event_id: i64,

    /// Event name at publication time.
    #[serde(rename = "event_name")]
    pub name: String,

    /// Free-text proposer name.
    pub created_by: String,

    /// Publication timestamp.
    pub created_at: DateTime<Utc>
}

/// One person's vote for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct Participant {
    /// Registration identifier.
    pub id: i64,

    /// The event voted for.
    pub event_id: i64,

    /// Trimmed voter name, compared case-sensitively.
    pub participant_name: String,

    /// Vote timestamp.
    pub registered_at: DateTime<Utc>
}

/// Everything written by the create-and-vote cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct Proposal {
    /// The new idea.
    pub event: Event,

    /// Its publication record.
    pub registered: RegisteredEvent,

    /// The proposer's automatic vote.
    pub participant: Participant
}

/// Result of a single vote inside a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    /// A new vote was stored.
    Registered,

    /// The participant had already voted for this event.
    AlreadyVoted,

    /// No event with this id exists.
    EventMissing,

    /// Storage failed; the vote was not stored.
    Failed
}

/// Per-event entry of a [`VoteReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct VoteResult {
    /// Event the vote was cast for.
    pub event_id: i64,

    /// What happened.
    pub status: VoteStatus,

    /// The stored vote when `status` is `registered`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<Participant>
}

/// Outcome of voting for several events under one name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct VoteReport {
    /// Trimmed voter name.
    pub participant_name: String,

    /// One entry per distinct requested event, in request order.
    pub results: Vec<VoteResult>
}

impl VoteReport {
    /// Number of votes actually stored.
    pub fn registered(&self) -> usize {
        self.count(VoteStatus::Registered)
    }

    /// Events the participant had already voted for.
    pub fn already_voted(&self) -> Vec<i64> {
        self.events_with(VoteStatus::AlreadyVoted)
    }

    /// Requested events that do not exist.
    pub fn missing(&self) -> Vec<i64> {
        self.events_with(VoteStatus::EventMissing)
    }

    /// Events whose vote failed in storage.
    pub fn failed(&self) -> Vec<i64> {
        self.events_with(VoteStatus::Failed)
    }

    fn count(&self, status: VoteStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    fn events_with(&self, status: VoteStatus) -> Vec<i64> {
        self.results
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.event_id)
            .collect()
    }
}

/// The cascade result plus the proposer's votes for other ideas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ProposalReport {
    /// Rows written atomically by the cascade.
    pub proposal: Proposal,

    /// Votes for existing ideas, cast after the cascade committed.
    pub extra_votes: VoteReport
}
