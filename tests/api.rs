// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE}
};
use event_ideas::app;
use event_ideas_core::{IdeaService, MemoryStore};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> Router {
    app(IdeaService::new(MemoryStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty())
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned()
        ))
    };
    (status, value)
}

async fn create_event(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/events/", Some(json!({ "event_name": name }))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
}

mod events {
    use super::*;

    #[tokio::test]
    async fn create_get_and_list() {
        let app = test_app();
        let (status, created) =
            send(&app, "POST", "/events/", Some(json!({ "event_name": "  Boliche " }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["event_name"], "Boliche");
        assert!(created["created_at"].is_string());
        let id = created["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, "GET", &format!("/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, list) = send(&app, "GET", "/events/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([created]));

        let (status, same) = send(&app, "GET", "/events", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(same, list);
    }

    #[tokio::test]
    async fn empty_list_is_ok() {
        let (status, body) = send(&test_app(), "GET", "/events/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict_with_detail() {
        let app = test_app();
        create_event(&app, "Boliche").await;

        let (status, body) =
            send(&app, "POST", "/events/", Some(json!({ "event_name": "Boliche  " }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["detail"].as_str().unwrap().contains("Boliche"));
    }

    #[tokio::test]
    async fn blank_name_is_bad_request() {
        let (status, body) =
            send(&test_app(), "POST", "/events/", Some(json!({ "event_name": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "event_name must not be empty" }));
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let app = test_app();
        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app, method, "/events/77", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["detail"], "event 77 not found");
        }
        let (status, _) =
            send(&app, "PUT", "/events/77", Some(json!({ "event_name": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_ids_are_rejected_with_detail() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/events/0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "event_id must be positive");

        let (status, body) = send(&app, "GET", "/events/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn malformed_bodies_never_reach_the_service() {
        let app = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/events/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "POST", "/events/", Some(json!({ "name": "x" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());

        let (_, list) = send(&app, "GET", "/events/", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn rename_and_conflicting_rename() {
        let app = test_app();
        let boliche = create_event(&app, "Boliche").await;
        let karaoke = create_event(&app, "Karaoke").await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/events/{karaoke}"),
            Some(json!({ "event_name": " Bingo " }))
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["event_name"], "Bingo");

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/events/{karaoke}"),
            Some(json!({ "event_name": "Boliche" }))
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = send(&app, "GET", &format!("/events/{boliche}"), None).await;
        assert_eq!(body["event_name"], "Boliche");
    }

    #[tokio::test]
    async fn delete_acknowledges_and_cascades() {
        let app = test_app();
        let (_, proposal) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({ "event_name": "Boliche", "proposer_name": "Ana" }))
        )
        .await;
        let id = proposal["proposal"]["event"]["id"].as_i64().unwrap();

        let (status, body) = send(&app, "DELETE", &format!("/events/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "detail": format!("event {id} deleted") }));

        let (_, registered) = send(&app, "GET", "/events/registered/", None).await;
        assert_eq!(registered, json!([]));
        let (_, names) = send(&app, "GET", "/events/participants/unique", None).await;
        assert_eq!(names, json!([]));
    }
}

mod participants {
    use super::*;

    #[tokio::test]
    async fn vote_once_per_event() {
        let app = test_app();
        let id = create_event(&app, "Boliche").await;
        let uri = format!("/events/{id}/participants");

        let (status, vote) =
            send(&app, "POST", &uri, Some(json!({ "participant_name": " Ana " }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vote["participant_name"], "Ana");
        assert_eq!(vote["event_id"], id);

        let (status, body) =
            send(&app, "POST", &uri, Some(json!({ "participant_name": "Ana" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["detail"].as_str().unwrap().contains("already voted"));

        let (status, list) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([vote]));
    }

    #[tokio::test]
    async fn vote_for_missing_event_is_not_found() {
        let (status, _) = send(
            &test_app(),
            "POST",
            "/events/5/participants",
            Some(json!({ "participant_name": "Ana" }))
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn single_vote_lifecycle() {
        let app = test_app();
        let id = create_event(&app, "Boliche").await;
        let (_, vote) = send(
            &app,
            "POST",
            &format!("/events/{id}/participants"),
            Some(json!({ "participant_name": "Ana" }))
        )
        .await;
        let reg = vote["id"].as_i64().unwrap();
        let uri = format!("/events/participants/{reg}");

        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, vote);

        let (status, renamed) =
            send(&app, "PUT", &uri, Some(json!({ "participant_name": "Ana Maria" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["participant_name"], "Ana Maria");

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["detail"], format!("registration {reg} deleted"));

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unique_names_keep_casing() {
        let app = test_app();
        let a = create_event(&app, "Boliche").await;
        let b = create_event(&app, "Karaoke").await;
        for (id, name) in [(a, "ana"), (a, "Ana"), (b, "Ana"), (b, "BEA")] {
            let (status, _) = send(
                &app,
                "POST",
                &format!("/events/{id}/participants"),
                Some(json!({ "participant_name": name }))
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, names) = send(&app, "GET", "/events/participants/unique", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            names,
            json!([
                { "participant_name": "Ana" },
                { "participant_name": "BEA" },
                { "participant_name": "ana" }
            ])
        );
    }
}

mod registered {
    use super::*;

    #[tokio::test]
    async fn publish_once() {
        let app = test_app();
        let id = create_event(&app, "Boliche").await;
        let uri = format!("/events/registered/?event_id={id}&event_name=Boliche&created_by=Ana");

        let (status, registered) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(registered["event_id"], id);
        assert_eq!(registered["event_name"], "Boliche");
        assert_eq!(registered["created_by"], "Ana");

        let (status, _) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let reg = registered["id"].as_i64().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/events/registered/{reg}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, registered);

        let (status, list) = send(&app, "GET", "/events/registered/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([registered]));
    }

    #[tokio::test]
    async fn publish_missing_event_is_not_found() {
        let (status, _) = send(
            &test_app(),
            "POST",
            "/events/registered/?event_id=9&event_name=Ghost&created_by=Ana",
            None
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_query_param_is_rejected() {
        let (status, body) =
            send(&test_app(), "POST", "/events/registered/?event_id=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn delete_keeps_event() {
        let app = test_app();
        let (_, proposal) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({ "event_name": "Boliche", "proposer_name": "Ana" }))
        )
        .await;
        let reg = proposal["proposal"]["registered"]["id"].as_i64().unwrap();
        let event = proposal["proposal"]["event"]["id"].as_i64().unwrap();

        let (status, body) = send(&app, "DELETE", &format!("/events/registered/{reg}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["detail"].as_str().unwrap().ends_with("deleted"));

        let (status, _) = send(&app, "GET", &format!("/events/{event}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &format!("/events/registered/{reg}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod ideas {
    use super::*;

    #[tokio::test]
    async fn propose_cascades() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({ "event_name": "Karaoke", "proposer_name": "Bea" }))
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let proposal = &body["proposal"];
        let id = proposal["event"]["id"].as_i64().unwrap();
        assert_eq!(proposal["event"]["event_name"], "Karaoke");
        assert_eq!(proposal["registered"]["event_id"], id);
        assert_eq!(proposal["registered"]["created_by"], "Bea");
        assert_eq!(proposal["participant"]["participant_name"], "Bea");
        assert_eq!(body["extra_votes"]["results"], json!([]));

        let (_, votes) = send(&app, "GET", &format!("/events/{id}/participants"), None).await;
        assert_eq!(votes.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_idea_writes_nothing() {
        let app = test_app();
        let idea = json!({ "event_name": "Karaoke", "proposer_name": "Bea" });
        send(&app, "POST", "/events/ideas", Some(idea)).await;

        let (status, _) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({ "event_name": "Karaoke", "proposer_name": "Caio" }))
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, names) = send(&app, "GET", "/events/participants/unique", None).await;
        assert_eq!(names, json!([{ "participant_name": "Bea" }]));
    }

    #[tokio::test]
    async fn propose_with_extra_votes() {
        let app = test_app();
        let boliche = create_event(&app, "Boliche").await;

        let (status, body) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({
                "event_name": "Karaoke",
                "proposer_name": "Bea",
                "also_vote_for": [boliche, 404]
            }))
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let results = &body["extra_votes"]["results"];
        assert_eq!(results[0]["event_id"], boliche);
        assert_eq!(results[0]["status"], "registered");
        assert_eq!(results[1]["status"], "event_missing");
    }

    #[tokio::test]
    async fn invalid_extra_vote_id_is_rejected_before_writing() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({
                "event_name": "Karaoke",
                "proposer_name": "Bea",
                "also_vote_for": [0]
            }))
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "event_id must be positive");

        let (_, events) = send(&app, "GET", "/events/", None).await;
        assert_eq!(events, json!([]));

        let (status, _) = send(
            &app,
            "POST",
            "/events/ideas",
            Some(json!({ "event_name": "Karaoke", "proposer_name": "Bea" }))
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn batch_votes_report_outcomes() {
        let app = test_app();
        let a = create_event(&app, "Boliche").await;
        let b = create_event(&app, "Karaoke").await;
        send(
            &app,
            "POST",
            &format!("/events/{b}/participants"),
            Some(json!({ "participant_name": "Ana" }))
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/events/votes",
            Some(json!({ "participant_name": "Ana", "event_ids": [a, b, 999] }))
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["participant_name"], "Ana");
        let statuses: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["status"].as_str().unwrap())
            .collect();
        assert_eq!(statuses, vec!["registered", "already_voted", "event_missing"]);
    }

    #[tokio::test]
    async fn blank_batch_voter_is_bad_request() {
        let (status, _) = send(
            &test_app(),
            "POST",
            "/events/votes",
            Some(json!({ "participant_name": " ", "event_ids": [1] }))
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

mod meta {
    use super::*;

    #[tokio::test]
    async fn health() {
        let (status, body) = send(&test_app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = send(&test_app(), "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "Event Ideas API");
        assert!(body["paths"]["/events/ideas"].is_object());
    }
}
