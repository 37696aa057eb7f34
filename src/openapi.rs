// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! OpenAPI document served at `/api-docs/openapi.json`.

use event_ideas_core::{
    dto::{
        CastVotesRequest, Detail, EventNameRequest, ParticipantNameRequest, ProposeIdeaRequest,
        UniqueParticipant
    },
    model::{
        Event, Participant, Proposal, ProposalReport, RegisteredEvent, VoteReport, VoteResult,
        VoteStatus
    }
};
use utoipa::OpenApi;

use crate::routes::{self, Health, events, ideas, participants, registered};

/// Generated API description.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Ideas API",
        description = "Propose ideas for team events and vote on them"
    ),
    paths(
        routes::health,
        events::list_events,
        events::create_event,
        events::get_event,
        events::update_event,
        events::delete_event,
        participants::register_participant,
        participants::list_participants,
        participants::list_unique_participants,
        participants::get_participant,
        participants::update_participant,
        participants::delete_participant,
        registered::register_event_creation,
        registered::list_registered_events,
        registered::get_registered_event,
        registered::delete_registered_event,
        ideas::propose_idea,
        ideas::cast_votes
    ),
    components(schemas(
        Event,
        RegisteredEvent,
        Participant,
        Proposal,
        ProposalReport,
        VoteReport,
        VoteResult,
        VoteStatus,
        EventNameRequest,
        ParticipantNameRequest,
        ProposeIdeaRequest,
        CastVotesRequest,
        UniqueParticipant,
        Detail,
        Health
    )),
    tags(
        (name = "Events", description = "Event ideas"),
        (name = "Participants", description = "Votes"),
        (name = "Registered events", description = "Publication records"),
        (name = "Ideas", description = "Proposal cascade and batch voting"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/events/",
            "/events/{event_id}",
            "/events/{event_id}/participants",
            "/events/participants/unique",
            "/events/participants/{registration_id}",
            "/events/registered/",
            "/events/registered/{id}",
            "/events/ideas",
            "/events/votes"
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn schemas_are_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in ["Event", "Participant", "RegisteredEvent", "Detail", "VoteReport"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
