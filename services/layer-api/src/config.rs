//! Service configuration from flags and environment.

use clap::Args;
use sqlx::postgres::PgConnectOptions;

/// Layer the service publishes.
pub const LAYER_NAME: &str = "regions";
pub const LAYER_TITLE: &str = "Regions";
pub const LAYER_SRS: &str = "EPSG:4326";

/// Database and GeoServer settings.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LayerApiConfig {
    /// PostGIS database name
    #[arg(long, env = "POSTGRES_DB", default_value = "gis")]
    pub postgres_db: String,

    /// PostGIS user
    #[arg(long, env = "POSTGRES_USER", default_value = "gis")]
    pub postgres_user: String,

    /// PostGIS password
    #[arg(long, env = "POSTGRES_PASSWORD", default_value = "gis", hide_env_values = true)]
    pub postgres_password: String,

    /// PostGIS host
    #[arg(long, env = "POSTGRES_HOST", default_value = "db")]
    pub postgres_host: String,

    /// PostGIS port
    #[arg(long, env = "POSTGRES_PORT", default_value = "5432")]
    pub postgres_port: u16,

    /// GeoServer workspace holding the layer
    #[arg(long, env = "GEOSERVER_WORKSPACE", default_value = "gis_test")]
    pub geoserver_workspace: String,

    /// GeoServer base URL as seen from this service
    #[arg(long, env = "GEOSERVER_BASE_URL", default_value = "http://geoserver:8080/geoserver")]
    pub geoserver_base_url: String,

    /// GeoServer basic auth user
    #[arg(long, env = "GEOSERVER_USER", default_value = "admin")]
    pub geoserver_user: String,

    /// GeoServer basic auth password
    #[arg(long, env = "GEOSERVER_PASSWORD", default_value = "geoserver", hide_env_values = true)]
    pub geoserver_password: String,

    /// Base URL browsers use to reach this service
    #[arg(long, env = "PUBLIC_API_BASE", default_value = "http://localhost:8000")]
    pub public_api_base: String,
}

impl Default for LayerApiConfig {
    fn default() -> Self {
        Self {
            postgres_db: "gis".to_string(),
            postgres_user: "gis".to_string(),
            postgres_password: "gis".to_string(),
            postgres_host: "db".to_string(),
            postgres_port: 5432,
            geoserver_workspace: "gis_test".to_string(),
            geoserver_base_url: "http://geoserver:8080/geoserver".to_string(),
            geoserver_user: "admin".to_string(),
            geoserver_password: "geoserver".to_string(),
            public_api_base: "http://localhost:8000".to_string(),
        }
    }
}

impl LayerApiConfig {
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .username(&self.postgres_user)
            .password(&self.postgres_password)
            .database(&self.postgres_db)
    }

    /// GeoServer's workspace WMS endpoint.
    pub fn upstream_wms_url(&self) -> String {
        format!(
            "{}/{}/wms",
            self.geoserver_base_url.trim_end_matches('/'),
            self.geoserver_workspace
        )
    }

    /// The proxy endpoint advertised to browsers.
    pub fn public_wms_url(&self) -> String {
        format!("{}/wms", self.public_api_base.trim_end_matches('/'))
    }

    /// `workspace:layer`
    pub fn qualified_layer(&self) -> String {
        format!("{}:{}", self.geoserver_workspace, LAYER_NAME)
    }
}
