//! The layer descriptor served by `GET /layers`.

use serde::{Deserialize, Serialize};

use crate::BoundingBox;

/// WMS endpoint that renders a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmsEndpoint {
    /// Base URL of the WMS service (no query string).
    pub url: String,
    /// Qualified layer name, usually `workspace:layer`.
    pub layer: String,
}

/// A single displayable layer.
///
/// Immutable once fetched. The `bbox` is published in the layer's native SRS;
/// the viewer treats the numbers as EPSG:4326 lon/lat when fitting the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    pub title: String,
    /// Spatial reference system identifier, e.g. `EPSG:4326`.
    pub srs: String,
    pub bbox: BoundingBox,
    pub wms: WmsEndpoint,
}
