//! HTTP routes

use axum::body::Bytes;
use axum::extract::State;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use solar_agent_core::{WebhookRequest, WebhookResponse};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{auth, AppState, ServerError};

pub fn build_router(state: AppState) -> Router {
    let webhook = Router::new()
        .route("/webhook", post(webhook))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_export))
        .merge(webhook)
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Body is read as raw bytes so a missing or wrong `Content-Type` is accepted;
/// only bytes that are not JSON at all are rejected.
async fn webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ServerError> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Webhook body is not JSON");
        ServerError::MalformedBody(state.dispatcher.capability_summary())
    })?;

    let request = WebhookRequest::from_json(&value);
    let intent = request.intent();
    metrics::counter!("webhook_requests_total", "intent" => intent.metric_label()).increment(1);

    Ok(Json(state.dispatcher.handle_webhook(&request)))
}

async fn root() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    sessions: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.dispatcher.sessions().len(),
    })
}

async fn metrics_export(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(ref handle) => handle.render().into_response(),
        None => ServerError::MetricsUnavailable.into_response(),
    }
}
