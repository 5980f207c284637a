//! Test helpers for netdev server integration tests
//!
//! Builds the full router over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, so no socket or database is needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use netdev_server::{api, config::Config, store::MemoryDeviceStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_TOKEN: &str = "test-token";

/// Router plus the bearer token to send, if any
pub struct TestApp {
    router: Router,
    token: Option<String>,
}

impl TestApp {
    /// Open API over an empty memory store
    pub fn new() -> Self {
        Self::build(None)
    }

    /// API gated behind [`TEST_TOKEN`]; requests carry the token
    pub fn with_auth() -> Self {
        let mut app = Self::build(Some(TEST_TOKEN));
        app.token = Some(TEST_TOKEN.to_string());
        app
    }

    fn build(api_token: Option<&str>) -> Self {
        let mut config = Config::default();
        config.auth.api_token = api_token.map(str::to_string);

        let store = Arc::new(MemoryDeviceStore::new());
        Self {
            router: api::create_router(store, &config),
            token: None,
        }
    }

    /// Same router, different credentials
    pub fn as_caller(&self, token: Option<&str>) -> Self {
        Self {
            router: self.router.clone(),
            token: token.map(str::to_string),
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body.to_string())).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Send a raw body, for malformed-payload tests
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ref token) = self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Create a device and return its id
    pub async fn create_device(&self, body: Value) -> String {
        let (status, json) = self.post("/api/v1/devices", body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
        json["data"]["id"].as_str().unwrap().to_string()
    }
}

/// Actions of a log listing, in response order
pub fn actions(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["action"].as_str().unwrap().to_string())
        .collect()
}
