//! WMS GetLegendGraphic URLs.

use url::form_urlencoded;
use wms_common::WmsEndpoint;

/// Legend image URL for a WMS layer, as a PNG.
///
/// Only the layer name is percent-encoded; the fixed parameters are written
/// verbatim.
pub fn legend_graphic_url(endpoint: &WmsEndpoint) -> String {
    let layer: String = form_urlencoded::byte_serialize(endpoint.layer.as_bytes()).collect();
    format!(
        "{}?SERVICE=WMS&REQUEST=GetLegendGraphic&FORMAT=image/png&LAYER={}",
        endpoint.url, layer
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_url_encodes_layer() {
        let endpoint = WmsEndpoint {
            url: "https://x/wms".to_string(),
            layer: "a:b".to_string(),
        };
        assert_eq!(
            legend_graphic_url(&endpoint),
            "https://x/wms?SERVICE=WMS&REQUEST=GetLegendGraphic&FORMAT=image/png&LAYER=a%3Ab"
        );
    }

    #[test]
    fn test_plain_layer_is_untouched() {
        let endpoint = WmsEndpoint {
            url: "http://localhost:8000/wms".to_string(),
            layer: "regions".to_string(),
        };
        assert!(legend_graphic_url(&endpoint).ends_with("&LAYER=regions"));
    }
}
