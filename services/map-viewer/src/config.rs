//! Viewer configuration.
//!
//! The API base is resolved once at startup and handed to the layer client.

/// Port the layer API listens on when no explicit base is configured.
pub const DEFAULT_API_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Base URL of the layer API, e.g. `http://localhost:8000`
    pub api_base: String,
}

impl ViewerConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    /// Pick the API base: an explicit value wins, otherwise the page origin
    /// with its port swapped for [`DEFAULT_API_PORT`].
    ///
    /// An origin without an explicit port is used unchanged.
    pub fn resolve(explicit_base: Option<String>, page_origin: &str) -> Self {
        match explicit_base.filter(|base| !base.trim().is_empty()) {
            Some(base) => Self::new(base),
            None => Self::new(with_api_port(page_origin)),
        }
    }

    /// `{api_base}/layers`
    pub fn layers_url(&self) -> String {
        format!("{}/layers", self.api_base.trim_end_matches('/'))
    }
}

fn with_api_port(origin: &str) -> String {
    if let Some((host, port)) = origin.rsplit_once(':') {
        if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
            return format!("{}:{}", host, DEFAULT_API_PORT);
        }
    }
    origin.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_wins() {
        let config = ViewerConfig::resolve(
            Some("https://api.example.com".to_string()),
            "http://localhost:5173",
        );
        assert_eq!(config.api_base, "https://api.example.com");
    }

    #[test]
    fn test_origin_port_is_replaced() {
        let config = ViewerConfig::resolve(None, "http://localhost:5173");
        assert_eq!(config.api_base, "http://localhost:8000");
    }

    #[test]
    fn test_origin_without_port_is_kept() {
        let config = ViewerConfig::resolve(None, "https://maps.example.com");
        assert_eq!(config.api_base, "https://maps.example.com");
    }

    #[test]
    fn test_blank_explicit_base_falls_back() {
        let config = ViewerConfig::resolve(Some("  ".to_string()), "http://127.0.0.1:3000");
        assert_eq!(config.api_base, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_layers_url_does_not_double_slash() {
        assert_eq!(
            ViewerConfig::new("http://localhost:8000/").layers_url(),
            "http://localhost:8000/layers"
        );
    }
}
