// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The proposal cascade and batch voting.

use axum::{Json, extract::State};
use event_ideas_core::{
    Store,
    dto::{CastVotesRequest, Detail, ProposeIdeaRequest},
    model::{ProposalReport, VoteReport}
};

use super::AppState;
use crate::{error::ApiError, extract::JsonBody};

/// Propose an idea: create, publish and vote for it atomically, then vote
/// for `also_vote_for` under the proposer's name.
///
/// # Responses
///
/// - `200 OK` - Proposal stored; extra-vote outcomes in `extra_votes`
/// - `400 Bad Request` - Blank names or invalid ids
/// - `409 Conflict` - An idea with this name exists; nothing was written
#[utoipa::path(
    post,
    path = "/events/ideas",
    tag = "Ideas",
    request_body = ProposeIdeaRequest,
    responses(
        (status = 200, description = "Idea proposed", body = ProposalReport),
        (status = 400, description = "Invalid input", body = Detail),
        (status = 409, description = "Idea already exists", body = Detail)
    )
)]
pub async fn propose_idea<S: Store>(
    State(service): State<AppState<S>>,
    JsonBody(body): JsonBody<ProposeIdeaRequest>
) -> Result<Json<ProposalReport>, ApiError> {
    Ok(Json(
        service
            .propose_and_vote_with(&body.event_name, &body.proposer_name, &body.also_vote_for)
            .await?
    ))
}

/// Vote for several events under one name.
///
/// Duplicates and missing events are reported per entry, not as errors.
#[utoipa::path(
    post,
    path = "/events/votes",
    tag = "Ideas",
    request_body = CastVotesRequest,
    responses(
        (status = 200, description = "Per-event outcomes", body = VoteReport),
        (status = 400, description = "Invalid input", body = Detail)
    )
)]
pub async fn cast_votes<S: Store>(
    State(service): State<AppState<S>>,
    JsonBody(body): JsonBody<CastVotesRequest>
) -> Result<Json<VoteReport>, ApiError> {
    Ok(Json(
        service
            .vote_for_many(&body.participant_name, &body.event_ids)
            .await?
    ))
}
