//! Bearer token gate for the API
//!
//! When a token is configured every request must carry
//! `Authorization: Bearer <token>`; anything else is rejected with
//! `401 UNAUTHORIZED` before a handler runs. Without a token the gate lets
//! everything through.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Expected token, if any
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    token: Option<Arc<str>>,
}

impl AuthState {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(Arc::from),
        }
    }

    pub fn is_open(&self) -> bool {
        self.token.is_none()
    }

    fn allows(&self, presented: Option<&str>) -> bool {
        match (&self.token, presented) {
            (None, _) => true,
            (Some(expected), Some(presented)) => {
                expected.as_bytes().ct_eq(presented.as_bytes()).into()
            },
            (Some(_), None) => false,
        }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Use with `axum::middleware::from_fn_with_state`
pub async fn require_bearer(State(auth): State<AuthState>, request: Request, next: Next) -> Response {
    if auth.allows(bearer_token(&request)) {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "Rejected request without a valid API token"
    );
    AppError::Unauthorized("A valid bearer token is required".to_string()).into_response()
}
