//! Initialization and caller level endpoints

use crate::api::ApiResponse;
use crate::domain::AccessLevel;
use crate::error::Result;
use crate::middleware::CallerIdentity;
use crate::server::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// POST /api/v1/initial-check
///
/// Always answers 200; `data` is false when the store is unusable.
pub async fn initial_check(State(state): State<AppState>) -> impl IntoResponse {
    let ok = state.bootstrap_service.initial_check().await;
    Json(ApiResponse::ok(ok))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLevelResponse {
    pub name: String,
    pub level: AccessLevel,
}

/// GET /api/v1/access-level
pub async fn access_level(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<impl IntoResponse> {
    let level = state.access_service.resolve(&caller).await?;
    Ok(Json(ApiResponse::ok(AccessLevelResponse {
        name: caller.name,
        level,
    })))
}
