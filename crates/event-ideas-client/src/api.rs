// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed wrapper over every API endpoint.
//!
//! Responses decode straight into the core's model types; non-2xx answers
//! become [`ClientError::Api`] carrying the server's `detail`.

use event_ideas_core::{
    dto::{
        CastVotesRequest, Detail, EventNameRequest, ParticipantNameRequest, ProposeIdeaRequest,
        UniqueParticipant
    },
    model::{Event, Participant, ProposalReport, RegisteredEvent, VoteReport}
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

/// Uncached API client.
///
/// Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String
}

impl ApiClient {
    /// Client for the API at `base_url` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client reusing a configured `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http,
            base
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "api response");
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::from_body(status.as_u16(), &body))
    }

    /// `true` when `/health` answers `ok`.
    ///
    /// # Errors
    ///
    /// Transport failure.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let body: serde_json::Value = self.send(self.http.get(self.url("/health"))).await?;
        Ok(body["status"] == "ok")
    }

    /// `GET /events/`.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or non-2xx status.
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.send(self.http.get(self.url("/events/"))).await
    }

    /// `POST /events/`.
    ///
    /// # Errors
    ///
    /// `409` when the name is taken, `400` when blank.
    pub async fn create_event(&self, name: &str) -> Result<Event, ClientError> {
        let body = EventNameRequest {
            event_name: name.to_owned()
        };
        self.send(self.http.post(self.url("/events/")).json(&body)).await
    }

    /// `GET /events/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent.
    pub async fn get_event(&self, id: i64) -> Result<Event, ClientError> {
        self.send(self.http.get(self.url(&format!("/events/{id}")))).await
    }

    /// `PUT /events/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent, `409` when the new name is taken.
    pub async fn update_event(&self, id: i64, name: &str) -> Result<Event, ClientError> {
        let body = EventNameRequest {
            event_name: name.to_owned()
        };
        self.send(self.http.put(self.url(&format!("/events/{id}"))).json(&body)).await
    }

    /// `DELETE /events/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent.
    pub async fn delete_event(&self, id: i64) -> Result<Detail, ClientError> {
        self.send(self.http.delete(self.url(&format!("/events/{id}")))).await
    }

    /// `POST /events/{id}/participants`.
    ///
    /// # Errors
    ///
    /// `409` when this name already voted, `404` when the event is absent.
    pub async fn register_participant(
        &self,
        event_id: i64,
        name: &str
    ) -> Result<Participant, ClientError> {
        let body = ParticipantNameRequest {
            participant_name: name.to_owned()
        };
        self.send(
            self.http
                .post(self.url(&format!("/events/{event_id}/participants")))
                .json(&body)
        )
        .await
    }

    /// `GET /events/{id}/participants`.
    ///
    /// # Errors
    ///
    /// `404` when the event is absent.
    pub async fn list_participants(&self, event_id: i64) -> Result<Vec<Participant>, ClientError> {
        self.send(self.http.get(self.url(&format!("/events/{event_id}/participants")))).await
    }

    /// `GET /events/participants/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent.
    pub async fn get_participant(&self, registration_id: i64) -> Result<Participant, ClientError> {
        self.send(self.http.get(self.url(&format!("/events/participants/{registration_id}")))).await
    }

    /// `PUT /events/participants/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent, `409` when the new name already voted.
    pub async fn update_participant(
        &self,
        registration_id: i64,
        name: &str
    ) -> Result<Participant, ClientError> {
        let body = ParticipantNameRequest {
            participant_name: name.to_owned()
        };
        self.send(
            self.http
                .put(self.url(&format!("/events/participants/{registration_id}")))
                .json(&body)
        )
        .await
    }

    /// `DELETE /events/participants/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent.
    pub async fn delete_participant(&self, registration_id: i64) -> Result<Detail, ClientError> {
        self.send(
            self.http
                .delete(self.url(&format!("/events/participants/{registration_id}")))
        )
        .await
    }

    /// `GET /events/participants/unique`, unwrapped to plain names.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or non-2xx status.
    pub async fn unique_participant_names(&self) -> Result<Vec<String>, ClientError> {
        let rows: Vec<UniqueParticipant> = self
            .send(self.http.get(self.url("/events/participants/unique")))
            .await?;
        Ok(rows.into_iter().map(|r| r.participant_name).collect())
    }

    /// `POST /events/registered/`.
    ///
    /// # Errors
    ///
    /// `409` when already published, `404` when the event is absent.
    pub async fn register_event_creation(
        &self,
        event_id: i64,
        event_name: &str,
        created_by: &str
    ) -> Result<RegisteredEvent, ClientError> {
        let id = event_id.to_string();
        let query = [
            ("event_id", id.as_str()),
            ("event_name", event_name),
            ("created_by", created_by)
        ];
        self.send(
            self.http
                .post(self.url("/events/registered/"))
                .query(&query)
        )
        .await
    }

    /// `GET /events/registered/`.
    ///
    /// # Errors
    ///
    /// [`ClientError`] on transport failure or non-2xx status.
    pub async fn list_registered_events(&self) -> Result<Vec<RegisteredEvent>, ClientError> {
        self.send(self.http.get(self.url("/events/registered/"))).await
    }

    /// `GET /events/registered/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent.
    pub async fn get_registered_event(&self, id: i64) -> Result<RegisteredEvent, ClientError> {
        self.send(self.http.get(self.url(&format!("/events/registered/{id}")))).await
    }

    /// `DELETE /events/registered/{id}`.
    ///
    /// # Errors
    ///
    /// `404` when absent.
    pub async fn delete_registered_event(&self, id: i64) -> Result<Detail, ClientError> {
        self.send(self.http.delete(self.url(&format!("/events/registered/{id}")))).await
    }

    /// `POST /events/ideas`.
    ///
    /// # Errors
    ///
    /// `409` when an idea with this name exists.
    pub async fn propose_idea(
        &self,
        event_name: &str,
        proposer_name: &str,
        also_vote_for: &[i64]
    ) -> Result<ProposalReport, ClientError> {
        let body = ProposeIdeaRequest {
            event_name:    event_name.to_owned(),
            proposer_name: proposer_name.to_owned(),
            also_vote_for: also_vote_for.to_vec()
        };
        self.send(self.http.post(self.url("/events/ideas")).json(&body)).await
    }

    /// `POST /events/votes`.
    ///
    /// # Errors
    ///
    /// `400` for a blank name.
    pub async fn cast_votes(
        &self,
        participant_name: &str,
        event_ids: &[i64]
    ) -> Result<VoteReport, ClientError> {
        let body = CastVotesRequest {
            participant_name: participant_name.to_owned(),
            event_ids:        event_ids.to_vec()
        };
        self.send(self.http.post(self.url("/events/votes")).json(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000///");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/events/"), "http://localhost:8000/events/");
    }
}
