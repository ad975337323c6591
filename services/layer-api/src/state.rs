//! Application state for the layer API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use reqwest::Client;

use crate::config::LayerApiConfig;
use crate::extent::{ExtentSource, PgExtentSource};

/// Upstream WMS requests give up after this long.
pub const PROXY_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state.
pub struct AppState {
    pub config: LayerApiConfig,

    /// Where `/layers` gets its bounding box.
    pub extents: Arc<dyn ExtentSource>,

    /// HTTP client for the GeoServer proxy.
    pub http: Client,

    /// Renders `/metrics`; absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// State backed by PostGIS.
    pub fn new(config: LayerApiConfig) -> Result<Self> {
        let extents = Arc::new(PgExtentSource::connect_lazy(&config));
        Self::with_extent_source(config, extents)
    }

    pub fn with_extent_source(config: LayerApiConfig, extents: Arc<dyn ExtentSource>) -> Result<Self> {
        let http = Client::builder()
            .timeout(PROXY_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            extents,
            http,
            prometheus: None,
        })
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
