//! Map view for one layer: base map, WMS overlay, legend and identify.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};
use wms_common::{CrsCode, LayerInfo};
use wms_protocol::{legend_graphic_url, CrossOrigin, FeatureInfoOptions, TileWmsSource};

use crate::controls::{ScaleBar, ScaleLine};
use crate::fetch::FeatureInfoFetcher;
use crate::identify::{IdentifyPanel, IdentifyResult};
use crate::map::{Control, MapLayer, MapSurface};
use crate::sources::OsmSource;
use crate::view::{FitOptions, View};

pub const INITIAL_ZOOM: f64 = 4.0;
pub const FIT_DURATION: Duration = Duration::from_millis(300);
pub const IDENTIFY_FEATURE_COUNT: u32 = 5;

/// Legend image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendImage {
    pub src: String,
    pub alt: &'static str,
    pub cross_origin: CrossOrigin,
}

/// What the view renders: the map container plus the two overlay panels.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewPanels {
    pub container: Option<String>,
    pub scale_bar: Option<ScaleBar>,
    pub legend: LegendImage,
    /// Pretty-printed identify JSON
    pub identify: String,
}

impl fmt::Display for MapViewPanels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.container {
            Some(target) => writeln!(f, "Map: #{}", target)?,
            None => writeln!(f, "Map: (detached)")?,
        }
        if let Some(bar) = &self.scale_bar {
            writeln!(f, "Scale: {} ({}px)", bar.label, bar.width_px)?;
        }
        writeln!(f, "Legend")?;
        writeln!(f, "  {}", self.legend.src)?;
        writeln!(f, "Identify")?;
        for line in self.identify.lines() {
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// Interactive map for one [`LayerInfo`].
///
/// The WMS source is derived from the layer and only rebuilt when a different
/// layer is set. Identify requests run as background tasks and are not
/// sequenced against each other: the panel shows whichever response arrives
/// last, not the one for the latest click.
pub struct MapView {
    layer: Arc<LayerInfo>,
    source: Arc<TileWmsSource>,
    fetcher: Arc<dyn FeatureInfoFetcher>,
    map: Option<MapSurface>,
    identify: IdentifyPanel,
    in_flight: Vec<AbortHandle>,
}

impl MapView {
    pub fn new(layer: Arc<LayerInfo>, fetcher: Arc<dyn FeatureInfoFetcher>) -> Self {
        let source = Arc::new(TileWmsSource::for_endpoint(&layer.wms));
        Self {
            layer,
            source,
            fetcher,
            map: None,
            identify: IdentifyPanel::new(),
            in_flight: Vec::new(),
        }
    }

    pub fn layer(&self) -> &Arc<LayerInfo> {
        &self.layer
    }

    pub fn source(&self) -> &Arc<TileWmsSource> {
        &self.source
    }

    pub fn map(&self) -> Option<&MapSurface> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut MapSurface> {
        self.map.as_mut()
    }

    /// Switch to another layer.
    ///
    /// Returns `false` (and does nothing) for the layer already shown. A
    /// mounted map is torn down and mounted again for the new layer.
    pub fn set_layer(&mut self, layer: Arc<LayerInfo>) -> bool {
        if Arc::ptr_eq(&self.layer, &layer) {
            return false;
        }

        let remount = self
            .map
            .as_ref()
            .and_then(|map| map.target().map(|t| (t.to_string(), map.size())));
        self.unmount();

        self.source = Arc::new(TileWmsSource::for_endpoint(&layer.wms));
        self.layer = layer;

        if let Some((target, size)) = remount {
            self.mount(target, size);
        }
        true
    }

    /// Create the map in `target` and fit it to the layer's bbox.
    pub fn mount(&mut self, target: impl Into<String>, size: (u32, u32)) {
        if self.map.is_some() {
            self.unmount();
        }

        let bbox = self.layer.bbox;
        let (lon, lat) = bbox.center();
        let center = projection::from_lon_lat(lon, lat);

        let mut map = MapSurface::new(
            target,
            size,
            vec![
                MapLayer::Base(OsmSource::default()),
                MapLayer::Wms(Arc::clone(&self.source)),
            ],
            View::new(CrsCode::Epsg3857, center, INITIAL_ZOOM),
            vec![Control::ScaleLine(ScaleLine::default())],
        );

        // bbox numbers are read as lon/lat whatever `srs` says.
        let fitted = projection::transform_extent(&bbox, CrsCode::Epsg4326, CrsCode::Epsg3857)
            .map_err(|e| e.to_string())
            .and_then(|extent| {
                map.view_mut()
                    .fit(&extent, size, &FitOptions::animated(FIT_DURATION))
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = fitted {
            debug!(layer = %self.layer.name, error = %e, "Could not fit view to layer extent");
        }

        info!(
            layer = %self.layer.name,
            target = map.target().unwrap_or_default(),
            zoom = map.view().zoom(),
            "Map mounted"
        );
        self.map = Some(map);
    }

    /// Detach the map from its container and abort identify requests still
    /// in flight.
    pub fn unmount(&mut self) {
        if let Some(mut map) = self.map.take() {
            map.set_target(None);
            debug!(layer = %self.layer.name, "Map unmounted");
        }
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.map.as_ref().is_some_and(MapSurface::is_attached)
    }

    /// GetFeatureInfo URL for a map coordinate at the current view.
    pub fn feature_info_url(&self, coordinate: (f64, f64)) -> Option<String> {
        let map = self.map.as_ref()?;
        let options = FeatureInfoOptions::json(&self.layer.wms.layer, IDENTIFY_FEATURE_COUNT);
        self.source.feature_info_url(
            coordinate,
            map.view().resolution(),
            map.view().projection(),
            &options.to_params(),
        )
    }

    /// Handle a single click at a pixel of the map container.
    pub fn single_click(&mut self, pixel: (f64, f64)) -> Option<JoinHandle<()>> {
        let coordinate = self.map.as_ref()?.coordinate_for_pixel(pixel);
        self.identify_at(coordinate)
    }

    /// Query the WMS for features at `coordinate`.
    ///
    /// Returns `None` without issuing a request when no GetFeatureInfo URL
    /// can be built. Must be called from within a tokio runtime.
    pub fn identify_at(&mut self, coordinate: (f64, f64)) -> Option<JoinHandle<()>> {
        let url = self.feature_info_url(coordinate)?;
        debug!(%url, "Identify");

        let fetcher = Arc::clone(&self.fetcher);
        let publisher = self.identify.publisher();
        let handle = tokio::spawn(async move {
            let result = IdentifyResult::from(fetcher.fetch_json(&url).await);
            publisher.send_replace(Some(result));
        });

        self.in_flight.retain(|h| !h.is_finished());
        self.in_flight.push(handle.abort_handle());
        Some(handle)
    }

    pub fn identify(&self) -> Option<IdentifyResult> {
        self.identify.current()
    }

    pub fn subscribe_identify(&self) -> watch::Receiver<Option<IdentifyResult>> {
        self.identify.subscribe()
    }

    pub fn legend(&self) -> LegendImage {
        LegendImage {
            src: legend_graphic_url(&self.layer.wms),
            alt: "Legend",
            cross_origin: CrossOrigin::Anonymous,
        }
    }

    pub fn render(&self) -> MapViewPanels {
        MapViewPanels {
            container: self
                .map
                .as_ref()
                .and_then(|map| map.target().map(str::to_string)),
            scale_bar: self.map.as_ref().and_then(MapSurface::scale_bar),
            legend: self.legend(),
            identify: self.identify.render(),
        }
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapView")
            .field("layer", &self.layer.name)
            .field("mounted", &self.is_mounted())
            .field("in_flight", &self.in_flight.len())
            .finish()
    }
}
