// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Publication records.

use axum::{Json, extract::State};
use event_ideas_core::{
    Store,
    dto::{Detail, RegisterEventParams},
    model::RegisteredEvent
};

use super::AppState;
use crate::{
    error::ApiError,
    extract::{PathParam, QueryParams}
};

/// Publish an existing event.
///
/// Parameters travel in the query string.
#[utoipa::path(
    post,
    path = "/events/registered/",
    tag = "Registered events",
    params(RegisterEventParams),
    responses(
        (status = 200, description = "Event published", body = RegisteredEvent),
        (status = 400, description = "Invalid input", body = Detail),
        (status = 404, description = "Event not found", body = Detail),
        (status = 409, description = "Already published", body = Detail)
    )
)]
pub async fn register_event_creation<S: Store>(
    State(service): State<AppState<S>>,
    QueryParams(params): QueryParams<RegisterEventParams>
) -> Result<Json<RegisteredEvent>, ApiError> {
    Ok(Json(
        service
            .register_event_creation(params.event_id, &params.event_name, &params.created_by)
            .await?
    ))
}

/// Every publication ordered by name.
#[utoipa::path(
    get,
    path = "/events/registered/",
    tag = "Registered events",
    responses((status = 200, description = "Publications", body = Vec<RegisteredEvent>))
)]
pub async fn list_registered_events<S: Store>(
    State(service): State<AppState<S>>
) -> Result<Json<Vec<RegisteredEvent>>, ApiError> {
    Ok(Json(service.list_registered_events().await?))
}

/// Get a publication by its id.
#[utoipa::path(
    get,
    path = "/events/registered/{id}",
    tag = "Registered events",
    params(("id" = i64, Path, description = "Publication id")),
    responses(
        (status = 200, description = "Publication found", body = RegisteredEvent),
        (status = 404, description = "Publication not found", body = Detail)
    )
)]
pub async fn get_registered_event<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(id): PathParam<i64>
) -> Result<Json<RegisteredEvent>, ApiError> {
    Ok(Json(service.get_registered_event(id).await?))
}

/// Delete a publication. The event and its votes stay.
#[utoipa::path(
    delete,
    path = "/events/registered/{id}",
    tag = "Registered events",
    params(("id" = i64, Path, description = "Publication id")),
    responses(
        (status = 200, description = "Publication deleted", body = Detail),
        (status = 404, description = "Publication not found", body = Detail)
    )
)]
pub async fn delete_registered_event<S: Store>(
    State(service): State<AppState<S>>,
    PathParam(id): PathParam<i64>
) -> Result<Json<Detail>, ApiError> {
    service.delete_registered_event(id).await?;
    Ok(Json(Detail::new(format!("registered event {id} deleted"))))
}
