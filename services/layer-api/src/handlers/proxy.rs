//! `/wms`: pass-through to GeoServer.
//!
//! Browsers only ever see this service's origin; GeoServer credentials stay
//! server side.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::Response,
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::metrics::{record_proxy_failure, record_proxy_request};
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// GET /wms
///
/// Forwards the query string unchanged and streams the upstream body back
/// with the upstream status and content type.
pub async fn wms_proxy_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let target = state.config.upstream_wms_url();
    let request = params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("REQUEST"))
        .map(|(_, value)| value.clone());
    debug!(%target, request = ?request, "Proxying WMS request");

    let started = Instant::now();
    let upstream = state
        .http
        .get(&target)
        .basic_auth(
            &state.config.geoserver_user,
            Some(&state.config.geoserver_password),
        )
        .query(&params)
        .send()
        .await
        .map_err(|e| {
            warn!(%target, error = %e, "Upstream WMS request failed");
            record_proxy_failure();
            ApiError::from(e)
        })?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    record_proxy_request(request.as_deref(), status.as_u16(), started.elapsed());

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| ApiError::Internal(format!("Failed to build proxy response: {}", e)))
}
