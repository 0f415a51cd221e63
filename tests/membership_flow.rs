//! Organization membership endpoints against the in-memory backend.

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
use moodwrap::domain::foundation::{OrganizationId, UserId};
use moodwrap::domain::organization::Profile;

const OWNER_TOKEN: &str = "owner-token";
const OUTSIDER_TOKEN: &str = "outsider-token";

fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

struct Fixture {
    store: Arc<InMemoryStore>,
    org: OrganizationId,
    app: Router,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let org = OrganizationId::new();
    store.add_profile(Profile::new(uid("owner")).with_email("owner@example.com"));
    store.add_profile(Profile::new(uid("bob")).with_email("bob@example.com"));
    store.add_profile(
        Profile::new(uid("carol"))
            .with_email("carol@other.org")
            .with_display_name("Carol"),
    );
    store.add_profile(Profile::new(uid("outsider")).with_email("outsider@example.com"));
    store.add_member(org, uid("owner"));

    let gateway = Arc::new(MemoryGateway::new(store.clone()));
    let validator = MockSessionValidator::new()
        .with_test_user(OWNER_TOKEN, "owner")
        .with_test_user(OUTSIDER_TOKEN, "outsider");
    let deps = AppDependencies {
        gateway: gateway.clone(),
        privileged: gateway,
        cache: Arc::new(InMemoryViewCache::new(Duration::from_secs(60))),
        session_validator: Arc::new(validator),
        gamification: GamificationConfig::default(),
    };

    Fixture {
        store,
        org,
        app: build_router(deps, &ServerConfig::default()),
    }
}

async fn send(
    app: &Router,
    token: &str,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
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
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn candidate_ids(body: &Value) -> Vec<&str> {
    body["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn candidates_exclude_existing_members() {
    let f = fixture();
    let uri = format!("/api/organizations/{}/candidates", f.org);

    let (status, body) = send(&f.app, OWNER_TOKEN, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!candidate_ids(&body).contains(&"owner"));
    assert_eq!(candidate_ids(&body).len(), 3);
    assert!(body.get("emptyMessage").is_none());
}

#[tokio::test]
async fn candidate_search_filters_and_explains_misses() {
    let f = fixture();

    let uri = format!("/api/organizations/{}/candidates?search=CAROL", f.org);
    let (_, body) = send(&f.app, OWNER_TOKEN, Method::GET, &uri, None).await;
    assert_eq!(candidate_ids(&body), vec!["carol"]);

    let uri = format!("/api/organizations/{}/candidates?search=nobody", f.org);
    let (_, body) = send(&f.app, OWNER_TOKEN, Method::GET, &uri, None).await;
    assert!(candidate_ids(&body).is_empty());
    assert_eq!(body["emptyMessage"], "No users found matching this email");
}

#[tokio::test]
async fn member_adds_selected_users() {
    let f = fixture();
    let uri = format!("/api/organizations/{}/members", f.org);

    let (status, body) = send(
        &f.app,
        OWNER_TOKEN,
        Method::POST,
        &uri,
        Some(json!({ "userIds": ["bob", "carol", "owner"] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "added": 2, "alreadyMembers": 1 }));

    let mut members = f.store.members_of(&f.org);
    members.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(members, vec![uid("bob"), uid("carol"), uid("owner")]);

    let candidates = format!("/api/organizations/{}/candidates", f.org);
    let (_, body) = send(&f.app, OWNER_TOKEN, Method::GET, &candidates, None).await;
    assert_eq!(candidate_ids(&body), vec!["outsider"]);
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let f = fixture();
    let uri = format!("/api/organizations/{}/members", f.org);

    let (status, _) = send(
        &f.app,
        OWNER_TOKEN,
        Method::POST,
        &uri,
        Some(json!({ "userIds": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(f.store.members_of(&f.org), vec![uid("owner")]);
}

#[tokio::test]
async fn non_member_cannot_add_members() {
    let f = fixture();
    let uri = format!("/api/organizations/{}/members", f.org);

    let (status, _) = send(
        &f.app,
        OUTSIDER_TOKEN,
        Method::POST,
        &uri,
        Some(json!({ "userIds": ["outsider"] })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(f.store.members_of(&f.org), vec![uid("owner")]);
}

#[tokio::test]
async fn malformed_organization_id_is_a_client_error() {
    let f = fixture();

    let (status, _) = send(
        &f.app,
        OWNER_TOKEN,
        Method::GET,
        "/api/organizations/not-a-uuid/candidates",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
