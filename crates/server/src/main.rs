//! Solar advisor webhook server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use solar_agent_agent::{InMemorySessionStore, IntentDispatcher};
use solar_agent_config::{LayeredCatalog, Settings, ToolsDomainView};
use solar_agent_core::SessionStore;
use solar_agent_server::{build_router, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    telemetry::init_tracing(settings.log_format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %settings.data_dir.display(),
        auth = settings.webhook_token().is_some(),
        "Starting solar advisor"
    );

    let catalog = Arc::new(LayeredCatalog::from_data_dir(&settings.data_dir).load());
    tracing::info!(
        cost_tiers = catalog.cost_tiers.len(),
        installer_locations = catalog.installers.len(),
        faqs = catalog.faqs.len(),
        "Catalog ready"
    );

    let view = Arc::new(ToolsDomainView::from_settings(&settings, catalog));
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let dispatcher = Arc::new(IntentDispatcher::new(store, view));

    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Metrics recorder not installed");
            None
        }
    };

    let state = AppState::new(dispatcher)
        .with_webhook_token(settings.webhook_token())
        .with_unauthorized_text(&settings.templates.unauthorized)
        .with_metrics(metrics)
        .with_request_timeout(Duration::from_secs(settings.request_timeout_secs));

    let app = build_router(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
