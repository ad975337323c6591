//! Layer client: one GET of `{api_base}/layers`.

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use wms_common::LayerInfo;

use crate::config::ViewerConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch layer: {0}")]
    Status(u16),

    #[error("Failed to fetch layer: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode layer: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches the layer descriptor. No retries, no timeout.
#[derive(Debug, Clone)]
pub struct LayerClient {
    http: Client,
    layers_url: String,
}

impl LayerClient {
    pub fn new(config: &ViewerConfig) -> Result<Self, FetchError> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(http, config))
    }

    /// Reuse an existing HTTP client.
    pub fn with_client(http: Client, config: &ViewerConfig) -> Self {
        Self {
            http,
            layers_url: config.layers_url(),
        }
    }

    pub fn layers_url(&self) -> &str {
        &self.layers_url
    }

    #[instrument(skip(self), fields(url = %self.layers_url))]
    pub async fn fetch_layer(&self) -> Result<LayerInfo, FetchError> {
        debug!("Fetching layer descriptor");

        let response = self.http.get(&self.layers_url).send().await.map_err(|e| {
            warn!(error = %e, "Layer request failed");
            FetchError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Layer request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let layer: LayerInfo = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Layer descriptor did not parse");
            FetchError::Decode(e)
        })?;

        debug!(layer = %layer.name, "Fetched layer descriptor");
        Ok(layer)
    }
}
