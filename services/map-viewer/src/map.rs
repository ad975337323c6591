//! The map surface: layers, view and controls bound to a container.

use std::sync::Arc;

use wms_common::{TileCoord, TileGrid};
use wms_protocol::TileWmsSource;

use crate::controls::{ScaleBar, ScaleLine};
use crate::sources::OsmSource;
use crate::view::View;

/// A raster layer, drawn bottom to top in the order given to the map.
#[derive(Debug, Clone)]
pub enum MapLayer {
    Base(OsmSource),
    Wms(Arc<TileWmsSource>),
}

impl MapLayer {
    /// Request URL for one tile of this layer.
    pub fn tile_url(&self, tile: &TileCoord, view: &View) -> Option<String> {
        match self {
            MapLayer::Base(source) => source.tile_url(tile),
            MapLayer::Wms(source) => source.tile_url(tile, view.projection()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Control {
    ScaleLine(ScaleLine),
}

#[derive(Debug)]
pub struct MapSurface {
    target: Option<String>,
    size: (u32, u32),
    layers: Vec<MapLayer>,
    view: View,
    controls: Vec<Control>,
    grid: TileGrid,
}

impl MapSurface {
    pub fn new(
        target: impl Into<String>,
        size: (u32, u32),
        layers: Vec<MapLayer>,
        view: View,
        controls: Vec<Control>,
    ) -> Self {
        Self {
            target: Some(target.into()),
            size,
            layers,
            view,
            controls,
            grid: TileGrid::web_mercator(wms_common::tile::DEFAULT_MAX_ZOOM),
        }
    }

    /// Container the map renders into, `None` once detached.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn set_target(&mut self, target: Option<String>) {
        self.target = target;
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn layers(&self) -> &[MapLayer] {
        &self.layers
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Map coordinate under a click.
    pub fn coordinate_for_pixel(&self, pixel: (f64, f64)) -> (f64, f64) {
        self.view.coordinate_for_pixel(pixel, self.size)
    }

    /// Tiles covering the visible extent at the zoom nearest the view.
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let z = self.grid.z_for_resolution(self.view.resolution());
        let extent = self.view.calculate_extent(self.size);
        let clamp = |v: f64, lo: f64, hi: f64| v.max(lo).min(hi);

        let (min_x, max_x) = (self.grid.extent.min_x, self.grid.extent.max_x);
        let (min_y, max_y) = (self.grid.extent.min_y, self.grid.extent.max_y);
        let top_left = self.grid.tile_coord_for_coord_and_z(
            clamp(extent.min_x, min_x, max_x),
            clamp(extent.max_y, min_y, max_y),
            z,
        );
        let bottom_right = self.grid.tile_coord_for_coord_and_z(
            clamp(extent.max_x, min_x, max_x),
            clamp(extent.min_y, min_y, max_y),
            z,
        );

        match (top_left, bottom_right) {
            (Some(tl), Some(br)) => (tl.y..=br.y)
                .flat_map(|y| (tl.x..=br.x).map(move |x| TileCoord::new(z, x, y)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Tile URLs for every layer over the visible tiles, bottom layer first.
    pub fn tile_requests(&self) -> Vec<String> {
        let tiles = self.visible_tiles();
        self.layers
            .iter()
            .flat_map(|layer| {
                tiles
                    .iter()
                    .filter_map(move |tile| layer.tile_url(tile, &self.view))
            })
            .collect()
    }

    pub fn scale_bar(&self) -> Option<ScaleBar> {
        self.controls.iter().find_map(|control| match control {
            Control::ScaleLine(line) => line.render(&self.view),
        })
    }
}
