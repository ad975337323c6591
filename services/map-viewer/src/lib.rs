//! Single-layer WMS map viewer.
//!
//! One page view is one cycle of: resolve the API base, fetch the layer
//! descriptor, mount a map with a base map and the layer's WMS overlay,
//! answer clicks with GetFeatureInfo queries, unmount.

pub mod app;
pub mod client;
pub mod config;
pub mod controls;
pub mod fetch;
pub mod identify;
pub mod map;
pub mod map_view;
pub mod sources;
pub mod view;

pub use app::{AppShell, AppState, Screen, Viewport};
pub use client::{FetchError, LayerClient};
pub use config::ViewerConfig;
pub use fetch::{FeatureInfoFetcher, HttpFetcher};
pub use identify::{IdentifyError, IdentifyResult};
pub use map_view::{LegendImage, MapView};
