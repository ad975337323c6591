//! `/layers`: the layer descriptor the viewer mounts.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use tracing::{info, instrument};
use wms_common::{BoundingBox, LayerInfo, WmsEndpoint};

use crate::config::{LayerApiConfig, LAYER_NAME, LAYER_SRS, LAYER_TITLE};
use crate::error::ApiError;
use crate::metrics::record_layers_request;
use crate::state::AppState;

/// Descriptor for the `regions` layer over `bbox`.
pub fn regions_layer(config: &LayerApiConfig, bbox: BoundingBox) -> LayerInfo {
    LayerInfo {
        name: LAYER_NAME.to_string(),
        title: LAYER_TITLE.to_string(),
        srs: LAYER_SRS.to_string(),
        bbox,
        wms: WmsEndpoint {
            url: config.public_wms_url(),
            layer: config.qualified_layer(),
        },
    }
}

/// GET /layers
#[instrument(skip_all)]
pub async fn layers_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<LayerInfo>, ApiError> {
    let result = match state.extents.extent().await {
        Ok(Some(bbox)) => Ok(regions_layer(&state.config, bbox)),
        Ok(None) => Err(ApiError::NoExtent),
        Err(e) => Err(ApiError::from(e)),
    };

    match &result {
        Ok(layer) => {
            info!(bbox = %layer.bbox.to_wms_string(), "Serving layer descriptor");
            record_layers_request(200);
        }
        Err(e) => record_layers_request(e.status_code().as_u16()),
    }

    result.map(Json)
}
