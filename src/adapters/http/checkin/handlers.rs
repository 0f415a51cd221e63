//! HTTP handlers for check-in endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::checkin::{
    GetCheckInViewHandler, GetCheckInViewQuery, RecordCheckInCommand, RecordCheckInHandler,
};
use crate::domain::gamification::RetryPolicy;
use crate::ports::{DataGateway, ViewCache};

use super::dto::{RecordCheckInRequest, RecordCheckInResponse, INVALID_REQUEST_MESSAGE};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CheckInAppState {
    pub gateway: Arc<dyn DataGateway>,
    pub cache: Arc<dyn ViewCache>,
    pub retry: RetryPolicy,
    pub xp_per_check_in: u32,
}

impl CheckInAppState {
    pub fn record_check_in_handler(&self) -> RecordCheckInHandler {
        RecordCheckInHandler::new(
            self.gateway.clone(),
            self.cache.clone(),
            self.retry,
            self.xp_per_check_in,
        )
    }

    pub fn check_in_view_handler(&self) -> GetCheckInViewHandler {
        GetCheckInViewHandler::new(self.gateway.clone(), self.cache.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/check-ins - Record a check-in
pub async fn record_check_in(
    State(state): State<CheckInAppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<RecordCheckInRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(user_id = %user.id, error = %rejection, "unreadable check-in body");
            return (
                rejection.status(),
                Json(RecordCheckInResponse::failure(INVALID_REQUEST_MESSAGE)),
            );
        }
    };

    let cmd = RecordCheckInCommand {
        user,
        emotion_id: request.emotion_id,
        intensity: request.intensity,
        triggers: request.triggers,
    };

    let outcome = state.record_check_in_handler().handle(cmd).await;
    let status = if outcome.is_success() {
        StatusCode::CREATED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(RecordCheckInResponse::from(outcome)))
}

/// GET /api/check-in - Emotion catalog and recent check-ins
pub async fn get_check_in_view(
    State(state): State<CheckInAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .check_in_view_handler()
        .handle(GetCheckInViewQuery { user })
        .await?;
    Ok(Json(view))
}
