//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use blastgate::{router, AppState};
use blastgate_test::{TestConfig, TestEnvironment};
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Test environment plus a router configured against it
pub fn app_with(config: TestConfig) -> (TestEnvironment, Router) {
    blastgate_test::init_test_logging();
    let env = TestEnvironment::with_config(config).expect("test environment");
    let app = router(AppState::from_config(env.config()));
    (env, app)
}

pub fn app() -> (TestEnvironment, Router) {
    app_with(TestConfig::default())
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
        .to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

pub async fn post(app: Router, path: &str, body: impl Into<String>) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .expect("valid request");
    send(app, request).await
}

pub async fn get(app: Router, path: &str) -> TestResponse {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("valid request");
    send(app, request).await
}
