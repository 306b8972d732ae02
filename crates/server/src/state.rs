//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use solar_agent_agent::IntentDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<IntentDispatcher>,
    /// Expected bearer token; `None` disables the check
    pub webhook_token: Option<Arc<str>>,
    /// Reply text for rejected requests
    pub unauthorized_text: Arc<str>,
    pub metrics: Option<PrometheusHandle>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(dispatcher: Arc<IntentDispatcher>) -> Self {
        Self {
            dispatcher,
            webhook_token: None,
            unauthorized_text: Arc::from("Unauthorized."),
            metrics: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_webhook_token(mut self, token: Option<&str>) -> Self {
        self.webhook_token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Arc::from);
        self
    }

    pub fn with_unauthorized_text(mut self, text: &str) -> Self {
        self.unauthorized_text = Arc::from(text);
        self
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
