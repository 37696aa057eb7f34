// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Event CRUD.

use axum::{Json, extract::State};
use event_ideas_core::{
    Store,
    dto::{Detail, EventNameRequest},
    model::Event
};

use super::AppState;
use crate::{
    error::ApiError,
    extract::{JsonBody, PathParam}
};

/// List every event, oldest first.
///
/// # Responses
///
/// - `200 OK` - Possibly empty list
/// - `500 Internal Server Error` - Storage failure
#[utoipa::path(
    get,
    path = "/events/",
    tag = "Events",
    responses(
        (status = 200, description = "All events", body = Vec<Event>),
        (status = 500, description = "Internal server error", body = Detail)
    )
)]
pub async fn list_events<S: Store>(
    State(service): State<AppState<S>>
) -> Result<Json<Vec<Event>>, ApiError> {
    Ok(Json(service.list_events().await?))
}

/// Create an event.
///
/// # Responses
///
/// - `200 OK` - Event created
/// - `400 Bad Request` - Blank or oversized name
/// - `409 Conflict` - Name already taken
#[utoipa::path(
    post,
    path = "/events/",
    tag = "Events",
    request_body = EventNameRequest,
    responses(
        (status = 200, description = "Event created", body = Event),
        (status = 400, description = "Invalid name", body = Detail),
        (status = 409, description = "Name already taken", body = Detail),
        (status = 500, description = "Internal server error", body = Detail)
    )
)]
pub async fn create_event<S: Store>(
    State(service): State<AppState<S>>,
    JsonBody(body): JsonBody<EventNameRequest>
) -> Result<Json<Event>, ApiError> {
    Ok(Json(service.create_event(&body.event_name).await?))
}

/// Get an event by id.
#[utoipa::path(
    get,
    path = "/events/{event_id}",
    tag = "Events",
    params(("event_id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, description = "Invalid id", body = Detail),
        (status = 404, description = "Event not found", body = Detail)
    )
)]
pub async fn get_event<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(event_id): PathParam<i64>
) -> Result<Json<Event>, ApiError> {
    Ok(Json(service.get_event(event_id).await?))
}

/// Rename an event.
///
/// The publication record keeps its original name.
#[utoipa::path(
    put,
    path = "/events/{event_id}",
    tag = "Events",
    params(("event_id" = i64, Path, description = "Event id")),
    request_body = EventNameRequest,
    responses(
        (status = 200, description = "Event renamed", body = Event),
        (status = 400, description = "Invalid id or name", body = Detail),
        (status = 404, description = "Event not found", body = Detail),
        (status = 409, description = "Name already taken", body = Detail)
    )
)]
pub async fn update_event<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(event_id): PathParam<i64>,
    JsonBody(body): JsonBody<EventNameRequest>
) -> Result<Json<Event>, ApiError> {
    Ok(Json(service.update_event(event_id, &body.event_name).await?))
}

/// Delete an event with its publication and votes.
#[utoipa::path(
    delete,
    path = "/events/{event_id}",
    tag = "Events",
    params(("event_id" = i64, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = Detail),
        (status = 400, description = "Invalid id", body = Detail),
        (status = 404, description = "Event not found", body = Detail)
    )
)]
pub async fn delete_event<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(event_id): PathParam<i64>
) -> Result<Json<Detail>, ApiError> {
    service.delete_event(event_id).await?;
    Ok(Json(Detail::new(format!("event {event_id} deleted"))))
}
