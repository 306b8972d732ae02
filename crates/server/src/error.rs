//! Server errors and their HTTP rendering

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use solar_agent_core::WebhookResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Carries the reply text sent with the 401
    #[error("Unauthorized")]
    Unauthorized(String),

    /// Body was not JSON; carries the reply text sent with the 400
    #[error("Malformed request body")]
    MalformedBody(String),

    #[error("Metrics recorder not installed")]
    MetricsUnavailable,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Unauthorized(text) => {
                (StatusCode::UNAUTHORIZED, Json(WebhookResponse::text(text))).into_response()
            }
            ServerError::MalformedBody(text) => {
                (StatusCode::BAD_REQUEST, Json(WebhookResponse::text(text))).into_response()
            }
            ServerError::MetricsUnavailable => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
        }
    }
}
