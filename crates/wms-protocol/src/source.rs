//! Tiled WMS source.
//!
//! A `TileWmsSource` requests a WMS layer as fixed-size GetMap tiles on the
//! Web Mercator grid and knows how to turn a map coordinate into a
//! GetFeatureInfo request against the same tile layout.

use url::Url;
use wms_common::tile::DEFAULT_MAX_ZOOM;
use wms_common::{BoundingBox, CrsCode, TileCoord, TileGrid, WmsEndpoint};

use crate::params::{WmsParams, WmsVersion, DEFAULT_VERSION};

/// CORS mode for image requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossOrigin {
    Anonymous,
}

impl CrossOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossOrigin::Anonymous => "anonymous",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TileWmsSource {
    url: Option<String>,
    params: WmsParams,
    tile_grid: TileGrid,
    cross_origin: Option<CrossOrigin>,
}

impl TileWmsSource {
    pub fn new(url: Option<String>, params: WmsParams) -> Self {
        Self {
            url: url.filter(|u| !u.trim().is_empty()),
            params,
            tile_grid: TileGrid::web_mercator(DEFAULT_MAX_ZOOM),
            cross_origin: None,
        }
    }

    /// Transparent PNG tiles of one WMS layer, loaded anonymously.
    pub fn for_endpoint(endpoint: &WmsEndpoint) -> Self {
        let params = WmsParams::new()
            .with("LAYERS", &endpoint.layer)
            .with("TILED", true)
            .with("TRANSPARENT", true)
            .with("FORMAT", "image/png");

        Self::new(Some(endpoint.url.clone()), params).with_cross_origin(CrossOrigin::Anonymous)
    }

    pub fn with_cross_origin(mut self, cross_origin: CrossOrigin) -> Self {
        self.cross_origin = Some(cross_origin);
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// User-supplied parameters (not including per-request ones).
    pub fn params(&self) -> &WmsParams {
        &self.params
    }

    pub fn tile_grid(&self) -> &TileGrid {
        &self.tile_grid
    }

    pub fn cross_origin(&self) -> Option<CrossOrigin> {
        self.cross_origin
    }

    /// GetMap URL for one tile, or `None` when the source cannot serve
    /// `projection` or has no URL.
    pub fn tile_url(&self, tile: &TileCoord, projection: CrsCode) -> Option<String> {
        if projection != self.tile_grid.crs {
            return None;
        }
        let extent = self.tile_grid.tile_extent(tile)?;

        let mut params = WmsParams::new()
            .with("SERVICE", "WMS")
            .with("VERSION", DEFAULT_VERSION)
            .with("REQUEST", "GetMap")
            .with("FORMAT", "image/png")
            .with("TRANSPARENT", true);
        params.extend(&self.params);

        self.request_url(&extent, projection, params)
    }

    /// GetFeatureInfo URL for a map coordinate at a view resolution.
    ///
    /// The request targets the tile that contains `coordinate` at the grid
    /// zoom nearest to `resolution`, with the pixel position inside that
    /// tile. `extra` is applied last, so it can override `QUERY_LAYERS` and
    /// anything else.
    ///
    /// Returns `None` when no URL can be built: no service URL, no layers to
    /// query, a projection the grid does not cover, a resolution that is not
    /// a positive number, or a coordinate outside the grid.
    pub fn feature_info_url(
        &self,
        coordinate: (f64, f64),
        resolution: f64,
        projection: CrsCode,
        extra: &WmsParams,
    ) -> Option<String> {
        if projection != self.tile_grid.crs || !(resolution.is_finite() && resolution > 0.0) {
            return None;
        }

        let (x, y) = coordinate;
        let z = self.tile_grid.z_for_resolution(resolution);
        let tile_resolution = self.tile_grid.resolution(z)?;
        let tile = self.tile_grid.tile_coord_for_coord_and_z(x, y, z)?;
        let extent = self.tile_grid.tile_extent(&tile)?;

        let mut params = WmsParams::new()
            .with("SERVICE", "WMS")
            .with("VERSION", DEFAULT_VERSION)
            .with("REQUEST", "GetFeatureInfo")
            .with("FORMAT", "image/png")
            .with("TRANSPARENT", true);
        if let Some(layers) = self.params.get("LAYERS") {
            params.set("QUERY_LAYERS", layers);
        }
        params.extend(&self.params);
        params.extend(extra);

        if params.get("QUERY_LAYERS").map_or(true, str::is_empty) {
            return None;
        }

        let max_pixel = (self.tile_grid.tile_size - 1) as f64;
        let i = ((x - extent.min_x) / tile_resolution).floor().clamp(0.0, max_pixel);
        let j = ((extent.max_y - y) / tile_resolution).floor().clamp(0.0, max_pixel);
        let (i_param, j_param) = params.version().pixel_params();
        params.set(i_param, i as u32);
        params.set(j_param, j as u32);

        self.request_url(&extent, projection, params)
    }

    fn request_url(
        &self,
        extent: &BoundingBox,
        projection: CrsCode,
        mut params: WmsParams,
    ) -> Option<String> {
        let base = self.url.as_deref()?;

        let version = params.version();
        let size = self.tile_grid.tile_size;
        params.set("WIDTH", size);
        params.set("HEIGHT", size);
        params.set(version.crs_param(), projection);
        if !params.contains("STYLES") {
            params.set("STYLES", "");
        }

        let bbox = if version == WmsVersion::V1_3 && projection.is_geographic() {
            extent.swap_axes()
        } else {
            *extent
        };
        params.set("BBOX", bbox.to_wms_string());

        let mut url = Url::parse(base).ok()?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }
        }
        Some(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> WmsEndpoint {
        WmsEndpoint {
            url: "http://localhost:8000/wms".to_string(),
            layer: "gis_test:regions".to_string(),
        }
    }

    fn query(url: &str) -> WmsParams {
        let url = Url::parse(url).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_endpoint_params() {
        let source = TileWmsSource::for_endpoint(&regions());
        assert_eq!(source.params().get("LAYERS"), Some("gis_test:regions"));
        assert_eq!(source.params().get("TILED"), Some("true"));
        assert_eq!(source.params().get("TRANSPARENT"), Some("true"));
        assert_eq!(source.params().get("FORMAT"), Some("image/png"));
        assert_eq!(source.cross_origin(), Some(CrossOrigin::Anonymous));
    }

    #[test]
    fn test_tile_url() {
        let source = TileWmsSource::for_endpoint(&regions());
        let url = source
            .tile_url(&TileCoord::new(1, 1, 0), CrsCode::Epsg3857)
            .unwrap();
        assert!(url.starts_with("http://localhost:8000/wms?"));

        let params = query(&url);
        assert_eq!(params.get("REQUEST"), Some("GetMap"));
        assert_eq!(params.get("CRS"), Some("EPSG:3857"));
        assert_eq!(params.get("WIDTH"), Some("256"));
        assert_eq!(params.get("STYLES"), Some(""));
        assert_eq!(params.get("BBOX"), Some("0,0,20037508.342789244,20037508.342789244"));
    }

    #[test]
    fn test_tile_url_rejects_foreign_projection() {
        let source = TileWmsSource::for_endpoint(&regions());
        assert!(source
            .tile_url(&TileCoord::new(0, 0, 0), CrsCode::Epsg4326)
            .is_none());
    }

    #[test]
    fn test_feature_info_pixel_position() {
        let source = TileWmsSource::for_endpoint(&regions());
        let resolution = source.tile_grid().resolution(1).unwrap();
        // Middle of pixel (64, 64) of the north-east tile at zoom 1.
        let half = wms_common::tile::WEB_MERCATOR_HALF_EXTENT;
        let url = source
            .feature_info_url(
                (64.5 * resolution, half - 64.5 * resolution),
                resolution,
                CrsCode::Epsg3857,
                &WmsParams::new(),
            )
            .unwrap();

        let params = query(&url);
        assert_eq!(params.get("REQUEST"), Some("GetFeatureInfo"));
        assert_eq!(params.get("QUERY_LAYERS"), Some("gis_test:regions"));
        assert_eq!(params.get("I"), Some("64"));
        assert_eq!(params.get("J"), Some("64"));
    }

    #[test]
    fn test_feature_info_uses_version_1_1_names() {
        let mut source = TileWmsSource::for_endpoint(&regions());
        source.params.set("VERSION", "1.1.1");
        let url = source
            .feature_info_url((1.0, 1.0), 1000.0, CrsCode::Epsg3857, &WmsParams::new())
            .unwrap();

        let params = query(&url);
        assert!(params.contains("X"));
        assert!(params.contains("SRS"));
        assert!(!params.contains("I"));
    }

    #[test]
    fn test_feature_info_unbuildable() {
        let source = TileWmsSource::new(None, WmsParams::new().with("LAYERS", "a"));
        assert!(source
            .feature_info_url((0.0, 0.0), 100.0, CrsCode::Epsg3857, &WmsParams::new())
            .is_none());

        let source = TileWmsSource::new(Some("http://x/wms".into()), WmsParams::new());
        assert!(source
            .feature_info_url((0.0, 0.0), 100.0, CrsCode::Epsg3857, &WmsParams::new())
            .is_none());

        let source = TileWmsSource::for_endpoint(&regions());
        assert!(source
            .feature_info_url((0.0, 0.0), f64::NAN, CrsCode::Epsg3857, &WmsParams::new())
            .is_none());
        assert!(source
            .feature_info_url((1e9, 0.0), 100.0, CrsCode::Epsg3857, &WmsParams::new())
            .is_none());
    }
}
