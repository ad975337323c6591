//! WMS GetFeatureInfo options.
//!
//! The request itself is assembled by
//! [`TileWmsSource::feature_info_url`](crate::TileWmsSource::feature_info_url);
//! this module holds the caller-facing knobs.

use crate::WmsParams;

/// MIME type for GeoJSON feature info responses.
pub const JSON_INFO_FORMAT: &str = "application/json";

/// Extra parameters for a GetFeatureInfo query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfoOptions {
    /// MIME type of the response, sent as `INFO_FORMAT`
    pub info_format: String,
    /// Maximum number of features to return
    pub feature_count: u32,
    /// Layers to query; `None` falls back to the source's `LAYERS`
    pub query_layers: Option<String>,
}

impl Default for FeatureInfoOptions {
    fn default() -> Self {
        Self {
            info_format: JSON_INFO_FORMAT.to_string(),
            feature_count: 1,
            query_layers: None,
        }
    }
}

impl FeatureInfoOptions {
    /// JSON output, `feature_count` features, from `layer`.
    pub fn json(layer: impl Into<String>, feature_count: u32) -> Self {
        Self {
            info_format: JSON_INFO_FORMAT.to_string(),
            feature_count,
            query_layers: Some(layer.into()),
        }
    }

    pub fn to_params(&self) -> WmsParams {
        let mut params = WmsParams::new()
            .with("INFO_FORMAT", &self.info_format)
            .with("FEATURE_COUNT", self.feature_count);
        if let Some(ref layers) = self.query_layers {
            params.set("QUERY_LAYERS", layers);
        }
        params
    }
}
