//! Layer API Service Library
//!
//! Publishes the single `regions` layer descriptor and proxies WMS traffic
//! to GeoServer so the viewer never talks to it directly.

pub mod config;
pub mod error;
pub mod extent;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the service router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::root_handler))
        .route("/layers", get(handlers::layers::layers_handler))
        .route("/wms", get(handlers::proxy::wms_proxy_handler))
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
