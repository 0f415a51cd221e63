//! Top-level router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{GamificationConfig, ServerConfig};
use crate::ports::{DataGateway, PrivilegedGateway, SessionValidator, ViewCache};

use super::analytics::{analytics_routes, AnalyticsAppState};
use super::checkin::{check_in_routes, CheckInAppState};
use super::middleware::auth_middleware;
use super::organization::{organization_routes, OrganizationAppState};

/// Everything the HTTP surface needs, built once at startup.
#[derive(Clone)]
pub struct AppDependencies {
    pub gateway: Arc<dyn DataGateway>,
    pub privileged: Arc<dyn PrivilegedGateway>,
    pub cache: Arc<dyn ViewCache>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub gamification: GamificationConfig,
}

/// Builds the full application router.
///
/// `/health` is public; everything under `/api` requires a Bearer token.
pub fn build_router(deps: AppDependencies, server: &ServerConfig) -> Router {
    let check_ins = CheckInAppState {
        gateway: deps.gateway.clone(),
        cache: deps.cache.clone(),
        retry: deps.gamification.retry_policy(),
        xp_per_check_in: deps.gamification.xp_per_check_in,
    };
    let analytics = AnalyticsAppState {
        gateway: deps.gateway.clone(),
        cache: deps.cache.clone(),
    };
    let organizations = OrganizationAppState {
        gateway: deps.gateway,
        privileged: deps.privileged,
    };

    let api = Router::new()
        .merge(check_in_routes().with_state(check_ins))
        .merge(analytics_routes().with_state(analytics))
        .merge(organization_routes().with_state(organizations));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            deps.session_validator,
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::cache::InMemoryViewCache;
    use crate::adapters::memory::{InMemoryStore, MemoryGateway};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let gateway = Arc::new(MemoryGateway::new(Arc::new(InMemoryStore::seeded())));
        let deps = AppDependencies {
            gateway: gateway.clone(),
            privileged: gateway,
            cache: Arc::new(InMemoryViewCache::new(Duration::from_secs(60))),
            session_validator: Arc::new(MockSessionValidator::new().with_test_user("t", "u-1")),
            gamification: GamificationConfig::default(),
        };
        build_router(deps, &ServerConfig::default())
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_requires_token() {
        let response = app()
            .oneshot(Request::get("/api/analytics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(
                Request::get("/api/nope")
                    .header("Authorization", "Bearer t")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn configured_origins_are_accepted() {
        let _ = cors_layer(&["https://app.example.com".to_string()]);
        let _ = cors_layer(&[]);
    }
}
