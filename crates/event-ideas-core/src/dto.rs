// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request and acknowledgement bodies shared by the HTTP surface and its
//! client.
//!
//! Names arrive untrimmed; the service trims and validates them, so these
//! types carry raw strings.

use serde::{Deserialize, Serialize};

/// Body of `POST /events/` and `PUT /events/{event_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct EventNameRequest {
    /// Idea name.
    pub event_name: String
}

/// Body of `POST /events/{event_id}/participants` and
/// `PUT /events/participants/{registration_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ParticipantNameRequest {
    /// Voter name.
    pub participant_name: String
}

/// Query parameters of `POST /events/registered/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "api", into_params(parameter_in = Query))]
pub struct RegisterEventParams {
    /// Event being published.
    pub event_id: i64,

    /// Name recorded on the publication.
    pub event_name: String,

    /// Proposer name.
    pub created_by: String
}

/// Body of `POST /events/ideas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ProposeIdeaRequest {
    /// Name of the new idea.
    pub event_name: String,

    /// Proposer, auto-registered as the first voter.
    pub proposer_name: String,

    /// Existing ideas the proposer also votes for.
    #[serde(default)]
    pub also_vote_for: Vec<i64>
}

/// Body of `POST /events/votes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct CastVotesRequest {
    /// Voter name.
    pub participant_name: String,

    /// Ideas to vote for.
    pub event_ids: Vec<i64>
}

/// Entry of `GET /events/participants/unique`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct UniqueParticipant {
    /// Distinct stored voter name.
    pub participant_name: String
}

/// `{ "detail": ... }` body used for error messages and delete
/// acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct Detail {
    /// Human-readable message.
    pub detail: String
}

impl Detail {
    /// Wrap a message.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propose_request_defaults_extra_votes() {
        let req: ProposeIdeaRequest =
            serde_json::from_str(r#"{"event_name":"Boliche","proposer_name":"Bea"}"#).unwrap();
        assert!(req.also_vote_for.is_empty());
    }

    #[test]
    fn detail_shape() {
        let json = serde_json::to_string(&Detail::new("gone")).unwrap();
        assert_eq!(json, r#"{"detail":"gone"}"#);
    }
}
