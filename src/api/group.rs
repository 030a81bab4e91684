//! Permission group API handlers

use crate::api::{parse_body, ApiResponse};
use crate::domain::CreateGroupInput;
use crate::error::Result;
use crate::middleware::CallerIdentity;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Create group
pub async fn create_group(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    body: String,
) -> Result<impl IntoResponse> {
    let input: CreateGroupInput = parse_body(&body)?;
    let group = state.group_service.create_group(&caller, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message("Group created", group.summary())),
    ))
}

/// List groups below the admin tier
pub async fn list_groups(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
) -> Result<impl IntoResponse> {
    let groups = state.group_service.list_groups(&caller).await?;
    Ok(Json(ApiResponse::ok(groups)))
}

/// Delete group
pub async fn delete_group(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.group_service.delete_group(&caller, &id).await?;
    Ok(Json(ApiResponse::message("Group deleted")))
}
