//! Stat card HTTP service.
//!
//! Renders PNG stat cards from query parameters at `GET /api/generate`,
//! with health, readiness and Prometheus endpoints alongside.

pub mod config;
pub mod handlers;
pub mod loaders;
pub mod metrics;
pub mod params;
pub mod state;

use axum::{extract::Extension, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use state::AppState;

/// Build the service router.
///
/// `/metrics` is only mounted when a Prometheus recorder was installed. The
/// static preview page under `public/` is served as a fallback when present.
pub fn build_router(state: Arc<AppState>, prometheus: Option<PrometheusHandle>) -> Router {
    let public_dir = state.config.public_dir();

    let mut app = Router::new()
        .route("/api/generate", get(handlers::generate_handler))
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler));

    if let Some(handle) = prometheus {
        app = app
            .route("/metrics", get(handlers::metrics_handler))
            .layer(Extension(handle));
    }

    if public_dir.is_dir() {
        info!(dir = %public_dir.display(), "Serving static preview page");
        app = app.fallback_service(ServeDir::new(public_dir));
    }

    app.layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
