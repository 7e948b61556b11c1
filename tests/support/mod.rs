//! Shared helpers for router-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use krishi_api::{app_router, connect_in_memory, ensure_tables, AppState, GatewayError, InferenceGateway};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_BODY_LIMIT: usize = 64 * 1024;

/// Gateway with canned answers; `None` means the call fails as unconfigured.
#[derive(Default)]
pub struct StubGateway {
    pub label: Option<String>,
    pub answer: Option<String>,
}

#[async_trait]
impl InferenceGateway for StubGateway {
    fn is_configured(&self) -> bool {
        self.label.is_some() || self.answer.is_some()
    }

    async fn classify_image(&self, _image: &[u8]) -> Result<String, GatewayError> {
        self.label.clone().ok_or(GatewayError::NotConfigured)
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, GatewayError> {
        self.answer.clone().ok_or(GatewayError::NotConfigured)
    }

    async fn forecast_prices(&self, _commodity: &str, _days: usize) -> Result<Vec<f64>, GatewayError> {
        Err(GatewayError::Unsupported)
    }
}

pub async fn app_with(gateway: StubGateway) -> Router {
    let pool = connect_in_memory().await.expect("in-memory pool");
    ensure_tables(&pool).await.expect("create tables");
    app_router(AppState::new(pool, Arc::new(gateway)), TEST_BODY_LIMIT)
}

pub async fn app() -> Router {
    app_with(StubGateway::default()).await
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("router call");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).expect("request");
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, req).await
}

/// POST a single multipart file part named `field`.
pub async fn post_upload(app: &Router, uri: &str, field: &str, filename: &str, data: &[u8]) -> (StatusCode, Value) {
    post_multipart(app, uri, field, Some(filename), data).await
}

/// POST a single multipart part; without a filename the part is a plain form value.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    field: &str,
    filename: Option<&str>,
    data: &[u8],
) -> (StatusCode, Value) {
    const BOUNDARY: &str = "krishi-test-boundary";
    let disposition = match filename {
        Some(filename) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, filename),
        None => format!("form-data; name=\"{}\"", field),
    };
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
            disposition
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .expect("request");
    send(app, req).await
}
