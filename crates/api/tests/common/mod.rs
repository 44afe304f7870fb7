//! Shared helpers for the HTTP integration tests.
//!
//! Requests go straight into the router through `tower::ServiceExt::oneshot`;
//! no TCP listener is involved.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use sigil_api::auth::jwt::JwtConfig;
use sigil_api::config::ServerConfig;
use sigil_api::router::build_app_router;
use sigil_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig::with_secret(TEST_JWT_SECRET),
    }
}

/// Build the full application router, middleware included, on `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(body), None).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PATCH, uri, Some(body), Some(token)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Registered account with a live access token.
pub struct TestUser {
    pub id: i64,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Register `email` through the API. The first registration in a test
/// database is the admin.
pub async fn register(pool: &PgPool, name: &str, email: &str) -> TestUser {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/register",
        json!({ "name": name, "email": email, "password": "correct-horse-battery" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    TestUser {
        id: json["data"]["user"]["id"].as_i64().unwrap(),
        role: json["data"]["user"]["role"].as_str().unwrap().to_string(),
        access_token: json["data"]["access_token"].as_str().unwrap().to_string(),
        refresh_token: json["data"]["refresh_token"].as_str().unwrap().to_string(),
    }
}

/// Create a character through the public endpoint and return its id.
pub async fn create_character(pool: &PgPool, body: Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/characters", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a campaign and return its id.
pub async fn create_campaign(pool: &PgPool, name: &str, max_players: Option<i32>) -> i64 {
    let mut body = json!({ "name": name, "master_name": "The GM" });
    if let Some(max) = max_players {
        body["max_players"] = json!(max);
    }
    let response = post_json(build_test_app(pool.clone()), "/api/v1/campaigns", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
