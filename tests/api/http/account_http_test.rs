//! Account HTTP API handler tests

use super::{get_json, login, login_root, post_bytes, post_json, post_raw, put_json, register};
use crate::api::bootstrapped_app;
use axum::http::StatusCode;
use cms_core::api::ApiResponse;
use cms_core::domain::{AccountSummary, GroupSummary, LoginSession};
use serde_json::{json, Value};

#[tokio::test]
async fn test_example_flow() {
    let app = bootstrapped_app().await;

    let (status, body): (StatusCode, Option<ApiResponse<LoginSession>>) = post_json(
        &app,
        "/api/v1/accounts/login",
        None,
        &json!({ "name": "admin", "secret": "admin1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session = body.unwrap().data.unwrap();
    assert_eq!(session.group_level.map(|l| l.value()), Some(99));

    register(&app, "bob", "pw1").await;
    let (status, body): (StatusCode, Option<ApiResponse<Value>>) = post_json(
        &app,
        "/api/v1/accounts/login",
        None,
        &json!({ "name": "bob", "secret": "pw1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = body.unwrap().data.unwrap();
    assert!(data["groupLevel"].is_null());
    assert!(data["groupName"].is_null());
}

#[tokio::test]
async fn test_register_returns_summary_without_secret() {
    let app = bootstrapped_app().await;

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) = post_json(
        &app,
        "/api/v1/accounts/register",
        None,
        &json!({ "userName": "alice", "userPwd": "wonderland" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert!(body.success);
    let data = body.data.unwrap();
    assert_eq!(data["name"], "alice");
    assert!(data.get("secret").is_none());
    assert!(data.get("token").is_none());
}

#[tokio::test]
async fn test_register_duplicate() {
    let app = bootstrapped_app().await;
    register(&app, "alice", "pw12").await;

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) = post_json(
        &app,
        "/api/v1/accounts/register",
        None,
        &json!({ "name": "alice", "secret": "other" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(!body.unwrap().success);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = bootstrapped_app().await;

    for raw in ["not json", "", "{\"name\":\"alice\"}"] {
        let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
            post_raw(&app, "/api/v1/accounts/register", raw).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "raw: {raw}");
        assert!(!body.unwrap().success);
    }
}

#[tokio::test]
async fn test_non_utf8_body_uses_failure_envelope() {
    let app = bootstrapped_app().await;

    for (path, raw) in [
        ("/api/v1/accounts/register", &[0xff, 0xfe, b'{'][..]),
        ("/api/v1/accounts/login", &[0xc3, 0x28][..]),
    ] {
        let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
            post_bytes(&app, path, raw).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "path: {path}");
        let body = body.unwrap();
        assert!(!body.success);
        assert!(body.data.is_none());
        assert!(body.message.is_some());
    }
}

#[tokio::test]
async fn test_undecodable_query_uses_failure_envelope() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
        get_json(&app, "/api/v1/accounts/search?term=a&term=b", Some(&root)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body = body.unwrap();
    assert!(!body.success);
    assert!(body.message.is_some());
}

#[tokio::test]
async fn test_login_failure_is_generic() {
    let app = bootstrapped_app().await;

    let (status_a, body_a): (StatusCode, Option<ApiResponse<Value>>) = post_json(
        &app,
        "/api/v1/accounts/login",
        None,
        &json!({ "name": "admin", "secret": "wrong" }),
    )
    .await;
    let (status_b, body_b): (StatusCode, Option<ApiResponse<Value>>) = post_json(
        &app,
        "/api/v1/accounts/login",
        None,
        &json!({ "name": "nobody", "secret": "admin1" }),
    )
    .await;

    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_b, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a.unwrap().message, body_b.unwrap().message);
}

#[tokio::test]
async fn test_search_accounts() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;
    register(&app, "alice", "pw12").await;
    register(&app, "Malice", "pw12").await;
    register(&app, "bob", "pw12").await;

    let (status, body): (StatusCode, Option<ApiResponse<Vec<AccountSummary>>>) =
        get_json(&app, "/api/v1/accounts/search?term=%20lice%20", Some(&root)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<String> = body.unwrap().data.unwrap().into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["alice".to_string(), "Malice".to_string()]);
}

#[tokio::test]
async fn test_search_blank_term_is_validation_even_without_identity() {
    let app = bootstrapped_app().await;

    for path in ["/api/v1/accounts/search?term=%20%20", "/api/v1/accounts/search"] {
        let (status, _): (StatusCode, Option<Value>) = get_json(&app, path, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "path: {path}");
    }

    let (status, _): (StatusCode, Option<Value>) =
        get_json(&app, "/api/v1/accounts/search?term=a", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_set_account_group() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (_, body): (StatusCode, Option<ApiResponse<GroupSummary>>) = post_json(
        &app,
        "/api/v1/groups",
        Some(&root),
        &json!({ "groupName": "ops", "level": 60 }),
    )
    .await;
    let ops = body.unwrap().data.unwrap();

    let (_, body): (StatusCode, Option<ApiResponse<AccountSummary>>) = post_json(
        &app,
        "/api/v1/accounts/register",
        None,
        &json!({ "name": "alice", "secret": "pw12" }),
    )
    .await;
    let alice = body.unwrap().data.unwrap();
    let path = format!("/api/v1/accounts/{}/group", alice.id);

    // Unknown group leaves the account untouched
    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app,
        &path,
        Some(&root),
        &json!({ "groupId": "00000000-0000-0000-0000-000000000001" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
        put_json(&app, &path, Some(&root), &json!({ "groupId": ops.id })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap().success);

    let alice = login(&app, "alice", "pw12").await;
    let (_, body): (StatusCode, Option<ApiResponse<Value>>) =
        get_json(&app, "/api/v1/access-level", Some(&alice)).await;
    assert_eq!(body.unwrap().data.unwrap()["level"], 60);
}

#[tokio::test]
async fn test_set_account_group_requires_ids() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, _): (StatusCode, Option<Value>) = put_json(
        &app,
        "/api/v1/accounts/some-account/group",
        Some(&root),
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
