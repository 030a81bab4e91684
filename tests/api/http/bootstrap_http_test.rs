//! Initialization, access level and health endpoint tests

use super::{get_json, login_root, post_json, register, login, TestCaller};
use crate::api::{bootstrapped_app, test_state};
use axum::http::StatusCode;
use cms_core::api::ApiResponse;
use cms_core::server::build_router;
use serde_json::Value;

#[tokio::test]
async fn test_initial_check_is_idempotent() {
    let app = build_router(test_state());

    for _ in 0..3 {
        let (status, body): (StatusCode, Option<ApiResponse<bool>>) =
            post_json(&app, "/api/v1/initial-check", None, &Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        let body = body.unwrap();
        assert!(body.success);
        assert_eq!(body.data, Some(true));
    }

    // The root account exists exactly once and can log in
    let root = login_root(&app).await;
    let (_, body): (StatusCode, Option<ApiResponse<Vec<Value>>>) =
        get_json(&app, "/api/v1/accounts/search?term=admin", Some(&root)).await;
    assert_eq!(body.unwrap().data.unwrap().len(), 1);
}

#[tokio::test]
async fn test_access_level_root() {
    let app = bootstrapped_app().await;
    let root = login_root(&app).await;

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
        get_json(&app, "/api/v1/access-level", Some(&root)).await;
    assert_eq!(status, StatusCode::OK);
    let data = body.unwrap().data.unwrap();
    assert_eq!(data["name"], "admin");
    assert_eq!(data["level"], 99);
}

#[tokio::test]
async fn test_access_level_without_identity() {
    let app = bootstrapped_app().await;

    let (status, body): (StatusCode, Option<ApiResponse<Value>>) =
        get_json(&app, "/api/v1/access-level", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.unwrap()["level"], -1);

    let forged = TestCaller {
        name: "admin".to_string(),
        token: "guess".to_string(),
    };
    let (_, body): (StatusCode, Option<ApiResponse<Value>>) =
        get_json(&app, "/api/v1/access-level", Some(&forged)).await;
    assert_eq!(body.unwrap().data.unwrap()["level"], -1);
}

#[tokio::test]
async fn test_access_level_account_without_group() {
    let app = bootstrapped_app().await;
    register(&app, "bob", "pw1").await;
    let bob = login(&app, "bob", "pw1").await;

    let (_, body): (StatusCode, Option<ApiResponse<Value>>) =
        get_json(&app, "/api/v1/access-level", Some(&bob)).await;
    assert_eq!(body.unwrap().data.unwrap()["level"], -1);
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = build_router(test_state());

    let (status, body): (StatusCode, Option<Value>) = get_json(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");

    let (status, _): (StatusCode, Option<Value>) = get_json(&app, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_disabled() {
    let app = build_router(test_state());
    let (status, _): (StatusCode, Option<Value>) = get_json(&app, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
