//! End-to-end check-in flow through the HTTP router with in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use moodwrap::adapters::auth::MockSessionValidator;
use moodwrap::adapters::cache::InMemoryViewCache;
use moodwrap::adapters::http::{build_router, AppDependencies};
use moodwrap::adapters::memory::{InMemoryStore, MemoryGateway};
use moodwrap::config::{GamificationConfig, ServerConfig};
use moodwrap::domain::foundation::UserId;
use moodwrap::domain::gamification::SideEffect;
use moodwrap::domain::organization::Profile;

const TOKEN: &str = "alice-token";
const USER: &str = "alice";

fn app(store: Arc<InMemoryStore>) -> Router {
    let gateway = Arc::new(MemoryGateway::new(store));
    let deps = AppDependencies {
        gateway: gateway.clone(),
        privileged: gateway,
        cache: Arc::new(InMemoryViewCache::new(Duration::from_secs(300))),
        session_validator: Arc::new(MockSessionValidator::new().with_test_user(TOKEN, USER)),
        gamification: GamificationConfig {
            retry_backoff_ms: 0,
            ..Default::default()
        },
    };
    build_router(deps, &ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn joy(store: &InMemoryStore) -> String {
    store.emotion_id("Joy").unwrap().to_string()
}

#[tokio::test]
async fn recording_a_check_in_reports_side_effects() {
    let store = Arc::new(InMemoryStore::seeded());
    let app = app(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": joy(&store), "intensity": 7, "triggers": ["work"] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["checkInId"].is_string());
    assert_eq!(body["sideEffects"]["streak"], "completed");
    assert_eq!(body["sideEffects"]["xp"], "completed");
    assert_eq!(body["sideEffects"]["badges"], "completed");

    let user = UserId::new(USER).unwrap();
    assert_eq!(store.check_ins_for(&user).len(), 1);
    assert_eq!(store.xp_of(&user), 10);
}

#[tokio::test]
async fn failed_insert_returns_generic_error() {
    let store = Arc::new(InMemoryStore::seeded());
    store.fail_inserts(true);
    let app = app(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": joy(&store), "intensity": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "success": false, "error": "Failed to save check-in" }));
    assert_eq!(store.procedure_calls(SideEffect::Streak), 0);
}

#[tokio::test]
async fn malformed_body_uses_failure_shape() {
    let store = Arc::new(InMemoryStore::seeded());
    let app = app(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": "not-a-uuid", "intensity": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "success": false, "error": "Invalid check-in request" }));
    assert!(store.check_ins_for(&UserId::new(USER).unwrap()).is_empty());
}

#[tokio::test]
async fn failing_side_effect_keeps_the_check_in() {
    let store = Arc::new(InMemoryStore::seeded());
    store.fail_procedure(SideEffect::Badges, u32::MAX);
    let app = app(store.clone());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": joy(&store), "intensity": 6 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["sideEffects"]["badges"], "failed");
    assert_eq!(store.procedure_calls(SideEffect::Badges), 3);
}

#[tokio::test]
async fn check_in_page_lists_catalog_and_recent_entries() {
    let store = Arc::new(InMemoryStore::seeded());
    let app = app(store.clone());

    let (status, body) = send(&app, Method::GET, "/api/check-in", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotions"].as_array().unwrap().len(), 10);
    assert!(body["recentCheckIns"].as_array().unwrap().is_empty());

    send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": joy(&store), "intensity": 8 })),
    )
    .await;

    let (_, body) = send(&app, Method::GET, "/api/check-in", None).await;
    assert_eq!(body["recentCheckIns"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn analytics_refresh_after_check_in() {
    let store = Arc::new(InMemoryStore::seeded());
    let app = app(store.clone());

    let (status, before) = send(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["totalCheckIns"], 0);
    assert_eq!(before["distribution"]["kind"], "empty");
    assert_eq!(before["distribution"]["message"], "No check-ins yet");

    send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": joy(&store), "intensity": 5, "triggers": ["sleep"] })),
    )
    .await;

    let (_, after) = send(&app, Method::GET, "/api/analytics", None).await;
    assert_eq!(after["totalCheckIns"], 1);
    assert_eq!(after["distribution"]["kind"], "chart");
    assert_eq!(after["topEmotion"]["name"], "Joy");
}

#[tokio::test]
async fn global_wrap_covers_every_user() {
    let store = Arc::new(InMemoryStore::seeded());
    store.add_profile(Profile::new(UserId::new(USER).unwrap()).with_email("alice@example.com"));
    store.add_profile(Profile::new(UserId::new("bob").unwrap()).with_email("bob@example.com"));
    let app = app(store.clone());

    send(
        &app,
        Method::POST,
        "/api/check-ins",
        Some(json!({ "emotionId": joy(&store), "intensity": 5 })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/global-wrap", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 2);
    assert_eq!(body["totalCheckIns"], 1);
    assert_eq!(body["topEmotion"]["name"], "Joy");
}

#[tokio::test]
async fn api_rejects_unknown_token() {
    let app = app(Arc::new(InMemoryStore::seeded()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/check-in")
                .header(header::AUTHORIZATION, "Bearer someone-else")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
