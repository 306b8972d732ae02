//! Bearer token check for the webhook route

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::{AppState, ServerError};

/// Rejects with 401 unless `Authorization` is exactly `Bearer <token>`.
/// A no-op when no token is configured.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    if let Some(ref expected) = state.webhook_token {
        if !is_authorized(request.headers(), expected) {
            metrics::counter!("webhook_unauthorized_total").increment(1);
            tracing::warn!(uri = %request.uri(), "Rejected webhook call with bad credentials");
            return Err(ServerError::Unauthorized(state.unauthorized_text.to_string()));
        }
    }
    Ok(next.run(request).await)
}

pub fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|provided| constant_time_eq(provided.as_bytes(), expected.as_bytes()))
        .unwrap_or(false)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
