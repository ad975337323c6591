//! Common test fixtures for viewer and layer API tests.

use wms_common::{BoundingBox, LayerInfo, WmsEndpoint};

/// Common bounding box definitions for testing.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: [f64; 4] = [-180.0, -90.0, 180.0, 90.0];

    /// Western Europe, straddling the prime meridian
    pub const EUROPE: [f64; 4] = [-10.0, 40.0, 10.0, 60.0];

    /// Continental United States bounding box
    pub const CONUS: [f64; 4] = [-130.0, 20.0, -60.0, 55.0];

    /// Single point (degenerate bbox)
    pub const POINT: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
}

/// Common layer identifiers for testing.
pub mod layers {
    /// Workspace-qualified layer the layer API publishes by default
    pub const REGIONS: &str = "gis_test:regions";

    /// WMS endpoint the layer API publishes by default
    pub const WMS_URL: &str = "http://localhost:8000/wms";
}

/// The `regions` layer over [`bbox::EUROPE`].
pub fn regions_layer() -> LayerInfo {
    layer_with_bbox(bbox::EUROPE)
}

/// The `regions` layer over an arbitrary extent.
pub fn layer_with_bbox(bbox: [f64; 4]) -> LayerInfo {
    LayerInfo {
        name: "regions".to_string(),
        title: "Regions".to_string(),
        srs: "EPSG:4326".to_string(),
        bbox: BoundingBox::from(bbox),
        wms: WmsEndpoint {
            url: layers::WMS_URL.to_string(),
            layer: layers::REGIONS.to_string(),
        },
    }
}

/// JSON body a `/layers` endpoint would return for [`regions_layer`].
pub const REGIONS_LAYER_JSON: &str = r#"{
    "name": "regions",
    "title": "Regions",
    "srs": "EPSG:4326",
    "bbox": [-10.0, 40.0, 10.0, 60.0],
    "wms": {"url": "http://localhost:8000/wms", "layer": "gis_test:regions"}
}"#;
