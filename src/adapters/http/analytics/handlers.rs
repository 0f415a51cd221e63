//! HTTP handlers for the aggregate views.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::analytics::{
    GetGlobalWrapHandler, GetGlobalWrapQuery, GetPersonalAnalyticsHandler,
    GetPersonalAnalyticsQuery, GetProfileOverviewHandler, GetProfileOverviewQuery,
};
use crate::ports::{DataGateway, ViewCache};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;

#[derive(Clone)]
pub struct AnalyticsAppState {
    pub gateway: Arc<dyn DataGateway>,
    pub cache: Arc<dyn ViewCache>,
}

impl AnalyticsAppState {
    pub fn personal_analytics_handler(&self) -> GetPersonalAnalyticsHandler {
        GetPersonalAnalyticsHandler::new(self.gateway.clone(), self.cache.clone())
    }

    pub fn profile_overview_handler(&self) -> GetProfileOverviewHandler {
        GetProfileOverviewHandler::new(self.gateway.clone(), self.cache.clone())
    }

    pub fn global_wrap_handler(&self) -> GetGlobalWrapHandler {
        GetGlobalWrapHandler::new(self.gateway.clone())
    }
}

/// GET /api/analytics
pub async fn get_personal_analytics(
    State(state): State<AnalyticsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .personal_analytics_handler()
        .handle(GetPersonalAnalyticsQuery { user })
        .await?;
    Ok(Json(view))
}

/// GET /api/profile
pub async fn get_profile_overview(
    State(state): State<AnalyticsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .profile_overview_handler()
        .handle(GetProfileOverviewQuery { user })
        .await?;
    Ok(Json(view))
}

/// GET /api/global-wrap
pub async fn get_global_wrap(
    State(state): State<AnalyticsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let wrap = state
        .global_wrap_handler()
        .handle(GetGlobalWrapQuery { user })
        .await?;
    Ok(Json(wrap))
}
