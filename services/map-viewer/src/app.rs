//! App shell: fetch the layer once, then show the map or the error.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info};
use wms_common::LayerInfo;

use crate::client::LayerClient;
use crate::fetch::FeatureInfoFetcher;
use crate::map_view::MapView;

pub const LOADING_MESSAGE: &str = "Loading…";

/// Lifecycle of the shell. `Loaded` owns the map view, so once the layer is
/// in hand the shell never shows the loading screen again.
#[derive(Debug)]
pub enum AppState {
    Loading,
    Error(String),
    Loaded(MapView),
}

impl AppState {
    pub fn layer(&self) -> Option<&Arc<LayerInfo>> {
        match self {
            AppState::Loaded(view) => Some(view.layer()),
            _ => None,
        }
    }
}

/// Where the map view gets mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub target: String,
    pub size: (u32, u32),
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            target: "map".to_string(),
            size: (1024, 768),
        }
    }
}

/// What the shell currently shows.
#[derive(Debug)]
pub enum Screen<'a> {
    Loading,
    Error(&'a str),
    Map(&'a MapView),
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Loading => write!(f, "{}", LOADING_MESSAGE),
            Screen::Error(message) => write!(f, "Error: {}", message),
            Screen::Map(view) => write!(f, "{}", view.render()),
        }
    }
}

pub struct AppShell {
    client: LayerClient,
    fetcher: Arc<dyn FeatureInfoFetcher>,
    viewport: Viewport,
    state: AppState,
}

impl AppShell {
    pub fn new(client: LayerClient, fetcher: Arc<dyn FeatureInfoFetcher>, viewport: Viewport) -> Self {
        Self {
            client,
            fetcher,
            viewport,
            state: AppState::Loading,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn map_view(&self) -> Option<&MapView> {
        match &self.state {
            AppState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn map_view_mut(&mut self) -> Option<&mut MapView> {
        match &mut self.state {
            AppState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    /// Fetch the layer and settle into `Loaded` or `Error`.
    ///
    /// Runs once; later calls return the settled state without fetching.
    pub async fn mount(&mut self) -> &AppState {
        if !matches!(self.state, AppState::Loading) {
            return &self.state;
        }

        match self.client.fetch_layer().await {
            Ok(layer) => {
                info!(layer = %layer.name, title = %layer.title, "Layer loaded");
                let mut view = MapView::new(Arc::new(layer), Arc::clone(&self.fetcher));
                view.mount(self.viewport.target.clone(), self.viewport.size);
                self.state = AppState::Loaded(view);
            }
            Err(e) => {
                error!(error = %e, "Layer fetch failed");
                self.state = AppState::Error(e.to_string());
            }
        }

        &self.state
    }

    /// Detach the map view, if any. The shell stays `Loaded`.
    pub fn unmount(&mut self) {
        if let Some(view) = self.map_view_mut() {
            view.unmount();
        }
    }

    pub fn render(&self) -> Screen<'_> {
        match &self.state {
            AppState::Loading => Screen::Loading,
            AppState::Error(message) => Screen::Error(message),
            AppState::Loaded(view) => Screen::Map(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::fetch::HttpFetcher;

    #[test]
    fn test_starts_loading() {
        let client = LayerClient::new(&ViewerConfig::new("http://localhost:8000")).unwrap();
        let app = AppShell::new(client, Arc::new(HttpFetcher::new().unwrap()), Viewport::default());

        assert!(matches!(app.state(), AppState::Loading));
        assert_eq!(app.render().to_string(), LOADING_MESSAGE);
        assert!(app.map_view().is_none());
    }

    #[test]
    fn test_error_screen_text() {
        assert_eq!(
            Screen::Error("Failed to fetch layer: 500").to_string(),
            "Error: Failed to fetch layer: 500"
        );
    }
}
