//! Solar advisor HTTP server
//!
//! Routes:
//! - `POST /webhook`: NLU fulfillment (bearer-protected when a token is set)
//! - `GET /`: liveness, plain "OK"
//! - `GET /health`: JSON status with live session count
//! - `GET /metrics`: Prometheus exposition

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use error::ServerError;
pub use routes::build_router;
pub use state::AppState;
