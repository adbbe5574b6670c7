use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::advising::config::AdvisingConfig;
use crate::workflows::advising::recommendation::ReferenceCatalog;
use crate::workflows::advising::router::advising_router;
use crate::workflows::advising::service::AdvisingSessionService;

fn router() -> axum::Router {
    let (service, _) = build_service();
    advising_router(Arc::new(service))
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn start_session(router: &axum::Router) -> String {
    let response = router
        .clone()
        .oneshot(post_empty("/api/v1/sessions"))
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    body["session_id"]
        .as_str()
        .expect("session id")
        .to_string()
}

#[tokio::test]
async fn starting_a_session_returns_created_with_prompts() {
    let response = router()
        .oneshot(post_empty("/api/v1/sessions"))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["state"], "age");
    assert_eq!(body["finished"], false);
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(2));
    assert!(body.get("outcome").is_none());
}

#[tokio::test]
async fn conversation_runs_to_completion_over_http() {
    let router = router();
    let session = start_session(&router).await;
    let uri = format!("/api/v1/sessions/{session}/replies");

    let mut last = Value::Null;
    for answer in ELIGIBLE_MASTER_ANSWERS {
        let response = router
            .clone()
            .oneshot(post_json(&uri, json!({ "text": answer })))
            .await
            .expect("router response");
        assert_eq!(response.status(), StatusCode::OK);
        last = read_json_body(response).await;
    }

    assert_eq!(last["state"], "terminal");
    assert_eq!(last["finished"], true);
    assert_eq!(last["outcome"]["kind"], "assessed");
    assert_eq!(last["outcome"]["eligible"], true);

    let status = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/sessions/{session}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router response");
    assert_eq!(status.status(), StatusCode::OK);
    let view = read_json_body(status).await;
    assert_eq!(view["state"], "terminal");
    assert_eq!(view["outcome"], "eligible");
    assert_eq!(view["profile"]["language_level"], "B2");

    let late = router
        .oneshot(post_json(&uri, json!({ "text": "again" })))
        .await
        .expect("router response");
    assert_eq!(late.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/sessions/session-404/replies",
            json!({ "text": "25" }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["session_id"], "session-404");
}

#[tokio::test]
async fn cancelling_twice_conflicts() {
    let router = router();
    let session = start_session(&router).await;
    let uri = format!("/api/v1/sessions/{session}/cancel");

    let first = router
        .clone()
        .oneshot(post_empty(&uri))
        .await
        .expect("router response");
    assert_eq!(first.status(), StatusCode::OK);
    let body = read_json_body(first).await;
    assert_eq!(body["outcome"]["kind"], "cancelled");

    let second = router
        .oneshot(post_empty(&uri))
        .await
        .expect("router response");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn concurrent_update_is_reported_as_conflict() {
    let service = AdvisingSessionService::new(
        Arc::new(ContendedRepository::default()),
        AdvisingConfig::default(),
        Arc::new(ReferenceCatalog::built_in()),
    );
    let router = advising_router(Arc::new(service));
    let session = start_session(&router).await;

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/sessions/{session}/replies"),
            json!({ "text": "27" }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json_body(response).await;
    assert_eq!(body["session_id"], session.as_str());
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("changed concurrently"));
}

#[tokio::test]
async fn assessment_endpoint_returns_recommendations_for_eligible_profiles() {
    let payload = json!({
        "age": 30,
        "major": "Computer Science",
        "degree": "master's degree",
        "gpa": 16.5,
        "language_level": "B2",
        "preferred_country": "Canada"
    });

    let response = router()
        .oneshot(post_json("/api/v1/assessments", payload))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["eligibility"]["eligible"], true);
    assert_eq!(body["recommendations"]["country"]["name"], "Canada");
    assert_eq!(
        body["recommendations"]["programs"][0]["name"],
        "Computer Science & Engineering"
    );
    assert!(body.get("improvement_tips").is_none());
}

#[tokio::test]
async fn assessment_endpoint_rejects_out_of_range_profiles() {
    let payload = json!({
        "age": 12,
        "gpa": 15.0,
        "language_level": "B2"
    });

    let response = router()
        .oneshot(post_json("/api/v1/assessments", payload))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error text")
        .contains("age 12"));
}

#[tokio::test]
async fn repository_outage_maps_to_internal_error() {
    let service = AdvisingSessionService::new(
        Arc::new(UnavailableRepository),
        AdvisingConfig::default(),
        Arc::new(ReferenceCatalog::built_in()),
    );

    let response = advising_router(Arc::new(service))
        .oneshot(post_empty("/api/v1/sessions"))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn help_endpoint_returns_usage_text() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/help")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body["help"].as_str().expect("help text").contains("/start"));
}
