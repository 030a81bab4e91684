//! Account API handlers

use crate::api::{parse_body, ApiResponse};
use crate::error::Result;
use crate::middleware::CallerIdentity;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

/// Register a new account. The body is a raw credential record.
pub async fn register(State(state): State<AppState>, body: String) -> Result<impl IntoResponse> {
    let summary = state.account_service.register(&body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message("Registration successful", summary)),
    ))
}

/// Log in and receive a session token
pub async fn login(State(state): State<AppState>, body: String) -> Result<impl IntoResponse> {
    let session = state.session_service.login(&body).await?;
    Ok(Json(ApiResponse::ok_with_message("Login successful", session)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}

/// Search accounts by name substring
pub async fn search(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let accounts = state
        .account_service
        .search_by_name(&query.term, &caller)
        .await?;
    Ok(Json(ApiResponse::ok(accounts)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccountGroupInput {
    #[serde(default)]
    pub group_id: String,
}

/// Move an account into a group
pub async fn set_group(
    State(state): State<AppState>,
    CallerIdentity(caller): CallerIdentity,
    Path(account_id): Path<String>,
    body: String,
) -> Result<impl IntoResponse> {
    let input: SetAccountGroupInput = parse_body(&body)?;
    state
        .account_service
        .set_account_group(&caller, &account_id, &input.group_id)
        .await?;
    Ok(Json(ApiResponse::message("Account group updated")))
}
