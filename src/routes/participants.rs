// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Votes, addressed per event or by registration id.

use axum::{Json, extract::State};
use event_ideas_core::{
    Store,
    dto::{Detail, ParticipantNameRequest, UniqueParticipant},
    model::Participant
};

use super::AppState;
use crate::{
    error::ApiError,
    extract::{JsonBody, PathParam}
};

/// Vote for an event.
///
/// # Responses
///
/// - `200 OK` - Vote stored
/// - `400 Bad Request` - Blank name or invalid id
/// - `404 Not Found` - No such event
/// - `409 Conflict` - This name already voted for this event
#[utoipa::path(
    post,
    path = "/events/{event_id}/participants",
    tag = "Participants",
    params(("event_id" = i64, Path, description = "Event id")),
    request_body = ParticipantNameRequest,
    responses(
        (status = 200, description = "Vote stored", body = Participant),
        (status = 400, description = "Invalid input", body = Detail),
        (status = 404, description = "Event not found", body = Detail),
        (status = 409, description = "Already voted", body = Detail)
    )
)]
pub async fn register_participant<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(event_id): PathParam<i64>,
    JsonBody(body): JsonBody<ParticipantNameRequest>
) -> Result<Json<Participant>, ApiError> {
    Ok(Json(
        service
            .register_participant(event_id, &body.participant_name)
            .await?
    ))
}

/// Votes for one event in registration order.
#[utoipa::path(
    get,
    path = "/events/{event_id}/participants",
    tag = "Participants",
    params(("event_id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Votes", body = Vec<Participant>),
        (status = 404, description = "Event not found", body = Detail)
    )
)]
pub async fn list_participants<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(event_id): PathParam<i64>
) -> Result<Json<Vec<Participant>>, ApiError> {
    Ok(Json(service.list_participants(event_id).await?))
}

/// Distinct voter names across all events.
#[utoipa::path(
    get,
    path = "/events/participants/unique",
    tag = "Participants",
    responses(
        (status = 200, description = "Names in byte order", body = Vec<UniqueParticipant>)
    )
)]
pub async fn list_unique_participants<S: Store>(
    State(service): State<AppState<S>>
) -> Result<Json<Vec<UniqueParticipant>>, ApiError> {
    let names = service.list_unique_participant_names().await?;
    Ok(Json(
        names
            .into_iter()
            .map(|participant_name| UniqueParticipant {
                participant_name
            })
            .collect()
    ))
}

/// Get a vote by registration id.
#[utoipa::path(
    get,
    path = "/events/participants/{registration_id}",
    tag = "Participants",
    params(("registration_id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Vote found", body = Participant),
        (status = 404, description = "Vote not found", body = Detail)
    )
)]
pub async fn get_participant<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(registration_id): PathParam<i64>
) -> Result<Json<Participant>, ApiError> {
    Ok(Json(service.get_participant(registration_id).await?))
}

/// Rename a vote.
#[utoipa::path(
    put,
    path = "/events/participants/{registration_id}",
    tag = "Participants",
    params(("registration_id" = i64, Path, description = "Registration id")),
    request_body = ParticipantNameRequest,
    responses(
        (status = 200, description = "Vote renamed", body = Participant),
        (status = 400, description = "Invalid input", body = Detail),
        (status = 404, description = "Vote not found", body = Detail),
        (status = 409, description = "New name already voted", body = Detail)
    )
)]
pub async fn update_participant<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(registration_id): PathParam<i64>,
    JsonBody(body): JsonBody<ParticipantNameRequest>
) -> Result<Json<Participant>, ApiError> {
    Ok(Json(
        service
            .update_participant(registration_id, &body.participant_name)
            .await?
    ))
}

/// Withdraw a vote.
#[utoipa::path(
    delete,
    path = "/events/participants/{registration_id}",
    tag = "Participants",
    params(("registration_id" = i64, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Vote deleted", body = Detail),
        (status = 404, description = "Vote not found", body = Detail)
    )
)]
pub async fn delete_participant<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(registration_id): PathParam<i64>
) -> Result<Json<Detail>, ApiError> {
    service.delete_participant(registration_id).await?;
    Ok(Json(Detail::new(format!(
        "registration {registration_id} deleted"
    ))))
}
