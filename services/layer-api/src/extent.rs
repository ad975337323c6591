//! Layer extent lookup.

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;
use wms_common::{BoundingBox, WmsError, WmsResult};

use crate::config::LayerApiConfig;

/// Extent of `public.regions`, each bound falling back to the world extent
/// when the table is empty.
const EXTENT_SQL: &str = "\
    SELECT \
        COALESCE(ST_XMin(ext), -180)::float8 AS minx, \
        COALESCE(ST_YMin(ext), -90)::float8 AS miny, \
        COALESCE(ST_XMax(ext), 180)::float8 AS maxx, \
        COALESCE(ST_YMax(ext), 90)::float8 AS maxy \
    FROM (SELECT ST_Extent(geom) AS ext FROM public.regions) q";

/// Where the layer's bounding box comes from.
#[async_trait]
pub trait ExtentSource: Send + Sync {
    /// `Ok(None)` when there is no extent to report.
    async fn extent(&self) -> WmsResult<Option<BoundingBox>>;
}

/// Extent from PostGIS.
pub struct PgExtentSource {
    pool: PgPool,
}

impl PgExtentSource {
    /// Pool that connects on first use, so the service starts without the
    /// database being up.
    pub fn connect_lazy(config: &LayerApiConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(config.pg_connect_options());
        Self { pool }
    }
}

#[async_trait]
impl ExtentSource for PgExtentSource {
    async fn extent(&self) -> WmsResult<Option<BoundingBox>> {
        let row = sqlx::query_as::<_, (f64, f64, f64, f64)>(EXTENT_SQL)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| WmsError::DatabaseError(e.to_string()))?;

        debug!(?row, "Queried regions extent");
        Ok(row.map(|(min_x, min_y, max_x, max_y)| BoundingBox::new(min_x, min_y, max_x, max_y)))
    }
}
