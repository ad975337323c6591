//! OGC WMS request building for a tiled client.
//!
//! Supports:
//! - WMS 1.1.1 and WMS 1.3.0 parameter conventions
//! - GetMap requests per tile of a Web Mercator grid
//! - GetFeatureInfo requests for a map coordinate
//! - GetLegendGraphic URLs

pub mod getfeatureinfo;
pub mod legend;
pub mod params;
pub mod source;

pub use getfeatureinfo::{FeatureInfoOptions, JSON_INFO_FORMAT};
pub use legend::legend_graphic_url;
pub use params::{WmsParams, WmsVersion};
pub use source::{CrossOrigin, TileWmsSource};
