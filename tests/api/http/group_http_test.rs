//! Permission group HTTP API handler tests

use super::{delete_json, get_json, login, login_root, post_json, register, TestCaller};
use crate::api::bootstrapped_app;
use axum::http::StatusCode;
use axum::Router;
use cms_core::api::ApiResponse;
use cms_core::domain::GroupSummary;
use serde_json::{json, Value};

async fn create_group(
    app: &Router,
    caller: &TestCaller,
    name: &str,
    level: i32,
) -> (StatusCode, Option<ApiResponse<GroupSummary>>) {
    post_json(
        app,
        "/api/v1/groups",
        Some(caller),
        &json!({ "groupName": name, "description": "desc", "level": level }),
    )
    .await
}

#[tokio::test]
async fn test_create_and_list_groups() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, body) = create_group(&app, &root, "ops", 10).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert!(body.success);
    assert_eq!(body.data.unwrap().name, "ops");

    create_group(&app, &root, "moderators", 60).await;

    let (status, body): (StatusCode, Option<ApiResponse<Vec<GroupSummary>>>) =
        get_json(&app, "/api/v1/groups", Some(&root)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = body.unwrap().data.unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["ops".to_string()]);
}

#[tokio::test]
async fn test_create_group_ceiling() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, body) = create_group(&app, &root, "elevated", 90).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body = body.unwrap();
    assert!(!body.success);
    assert!(body.data.is_none());
    assert!(body.message.is_some());
}

#[tokio::test]
async fn test_create_group_duplicate() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    create_group(&app, &root, "ops", 10).await;
    let (status, _) = create_group(&app, &root, "ops", 20).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_group_malformed_body() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
        post_json(&app, "/api/v1/groups", Some(&root), &json!({ "level": "high" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!body.unwrap().success);
}

#[tokio::test]
async fn test_group_endpoints_deny_unprivileged() {
    let app = bootstrapped_app().await;
    register(&app, "bob", "pw1").await;
    let bob = login(&app, "bob", "pw1").await;

    let (status, body) = create_group(&app, &bob, "ops", 10).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.unwrap().message.as_deref(), Some("Permission denied"));

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/v1/groups", Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _): (StatusCode, Option<Value>) = get_json(&app, "/api/v1/groups", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_group() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;
    let (_, body) = create_group(&app, &root, "ops", 10).await;
    let ops = body.unwrap().data.unwrap();

    let path = format!("/api/v1/groups/{}", ops.id);
    let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
        delete_json(&app, &path, Some(&root)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap().success);

    let (status, _): (StatusCode, Option<Value>) = delete_json(&app, &path, Some(&root)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_group_id() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, _): (StatusCode, Option<Value>) =
        delete_json(&app, "/api/v1/groups/not-a-group", Some(&root)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
