use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use catalog::bundled_iso_table;
use formats::{IsoTable, DEFAULT_OBJECT};
use geometry::{GeoUnion, UnionPrimitive};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod countries;
mod data_sources;

use countries::CountryData;
use data_sources::{CountrySource, FallbackSource, FilesystemSource, HttpSource};

const WORLD_ATLAS_URL: &str = "https://cdn.jsdelivr.net/npm/world-atlas@2.0.2/countries-110m.json";

#[derive(Clone)]
pub struct AppState {
    countries: Arc<CountryData>,
    union: Arc<dyn UnionPrimitive + Send + Sync>,
}

#[derive(Clone, Debug)]
struct ServerConfig {
    addr: SocketAddr,
    countries_url: String,
    countries_path: Option<PathBuf>,
    countries_object: String,
    iso_table_path: Option<PathBuf>,
    fetch_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let addr = env_var_string("COLLIDE_ADDR", "127.0.0.1:9200")
            .parse()
            .map_err(|e| format!("invalid COLLIDE_ADDR: {e}"))?;
        Ok(Self {
            addr,
            countries_url: env_var_string("COUNTRIES_URL", WORLD_ATLAS_URL),
            countries_path: env_var_path("COUNTRIES_PATH"),
            countries_object: env_var_string("COUNTRIES_OBJECT", DEFAULT_OBJECT),
            iso_table_path: env_var_path("ISO_TABLE_PATH"),
            fetch_timeout: Duration::from_secs(env_var_u64("COUNTRIES_TIMEOUT_SECS", 30)),
        })
    }

    /// Local file first when configured, the remote atlas otherwise.
    fn country_source(&self) -> Result<Arc<dyn CountrySource>, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(self.fetch_timeout)
            .build()?;
        let http: Arc<dyn CountrySource> = Arc::new(HttpSource::new(&self.countries_url, client));
        Ok(match &self.countries_path {
            Some(path) => Arc::new(FallbackSource::new(vec![
                Arc::new(FilesystemSource::new(path)),
                http,
            ])),
            None => http,
        })
    }

    async fn iso_table(&self) -> Result<IsoTable, Box<dyn std::error::Error>> {
        match &self.iso_table_path {
            Some(path) => {
                let payload = tokio::fs::read_to_string(path).await?;
                let table = IsoTable::from_json_str(&payload)?;
                info!("loaded {} ISO codes from {}", table.len(), path.display());
                Ok(table)
            }
            None => Ok(bundled_iso_table().clone()),
        }
    }
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(api::healthz))
        .route("/api/country_svg", get(api::country_svg))
        .route("/api/merge_countries", get(api::merge_countries))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()?;
    let source = config.country_source()?;
    info!("country data from {}", source.name());

    let state = AppState {
        countries: Arc::new(CountryData::new(
            source,
            config.countries_object.clone(),
            config.iso_table().await?,
        )),
        union: Arc::new(GeoUnion),
    };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("collide server listening on http://{}", config.addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn env_var_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_var_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
