//! WMS key/value parameters.

use std::collections::BTreeMap;
use std::fmt;

/// Version assumed when the caller does not set `VERSION`.
pub const DEFAULT_VERSION: &str = "1.3.0";

/// WMS protocol version, as far as request encoding is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmsVersion {
    /// 1.1.x: `SRS`, `X`/`Y`, always x/y axis order
    V1_1,
    /// 1.3.0: `CRS`, `I`/`J`, CRS-native axis order
    V1_3,
}

impl WmsVersion {
    /// Classify a `VERSION` string. Anything below 1.3 encodes as 1.1.
    pub fn parse(version: &str) -> Self {
        let mut parts = version.split('.').map(|p| p.parse::<u32>().unwrap_or(0));
        let major = parts.next().unwrap_or(0);
        let minor = parts.next().unwrap_or(0);
        if (major, minor) >= (1, 3) {
            WmsVersion::V1_3
        } else {
            WmsVersion::V1_1
        }
    }

    /// Name of the CRS parameter.
    pub fn crs_param(&self) -> &'static str {
        match self {
            WmsVersion::V1_1 => "SRS",
            WmsVersion::V1_3 => "CRS",
        }
    }

    /// Names of the pixel column/row parameters for GetFeatureInfo.
    pub fn pixel_params(&self) -> (&'static str, &'static str) {
        match self {
            WmsVersion::V1_1 => ("X", "Y"),
            WmsVersion::V1_3 => ("I", "J"),
        }
    }
}

/// Ordered WMS parameter map.
///
/// Keys are stored upper-cased, so `layers` and `LAYERS` name the same
/// parameter. Iteration order is alphabetical, which keeps generated URLs
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WmsParams(BTreeMap<String, String>);

impl WmsParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl fmt::Display) -> &mut Self {
        self.0.insert(key.to_uppercase(), value.to_string());
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(&key.to_uppercase())
    }

    /// Overlay `other` on top of `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: &WmsParams) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Protocol version these parameters ask for.
    pub fn version(&self) -> WmsVersion {
        WmsVersion::parse(self.get("VERSION").unwrap_or(DEFAULT_VERSION))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for WmsParams {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut params = WmsParams::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_case_insensitive() {
        let params = WmsParams::new().with("layers", "a:b");
        assert_eq!(params.get("LAYERS"), Some("a:b"));
        assert!(params.contains("Layers"));
    }

    #[test]
    fn test_extend_overrides() {
        let mut base = WmsParams::new().with("FORMAT", "image/png").with("TILED", true);
        base.extend(&WmsParams::new().with("format", "image/jpeg"));
        assert_eq!(base.get("FORMAT"), Some("image/jpeg"));
        assert_eq!(base.get("TILED"), Some("true"));
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!(WmsVersion::parse("1.3.0"), WmsVersion::V1_3);
        assert_eq!(WmsVersion::parse("1.1.1"), WmsVersion::V1_1);
        assert_eq!(WmsParams::new().version(), WmsVersion::V1_3);
        assert_eq!(
            WmsParams::new().with("VERSION", "1.1.1").version(),
            WmsVersion::V1_1
        );
    }
}
