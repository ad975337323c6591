//! Base map tile source.

use wms_common::TileCoord;
use wms_protocol::CrossOrigin;

pub const OSM_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// OpenStreetMap XYZ tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmSource {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u32,
    pub cross_origin: CrossOrigin,
}

impl Default for OsmSource {
    fn default() -> Self {
        Self {
            url_template: OSM_URL_TEMPLATE.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            max_zoom: 19,
            cross_origin: CrossOrigin::Anonymous,
        }
    }
}

impl OsmSource {
    /// Tile URL, or `None` above the server's zoom range.
    pub fn tile_url(&self, tile: &TileCoord) -> Option<String> {
        if tile.z > self.max_zoom {
            return None;
        }
        Some(
            self.url_template
                .replace("{z}", &tile.z.to_string())
                .replace("{x}", &tile.x.to_string())
                .replace("{y}", &tile.y.to_string()),
        )
    }
}
