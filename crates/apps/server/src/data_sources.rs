//! Sources for the country boundary payload (GeoJSON or TopoJSON text).
//!
//! - Filesystem (a local copy of the world atlas)
//! - Remote HTTP (the world-atlas CDN by default)
//! - In-memory (tests, preloaded data)
//! - Fallback (first source that answers wins)

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Error type for data source operations.
#[derive(Debug)]
pub struct DataSourceError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {source}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DataSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl DataSourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Something that can produce the country boundary payload.
///
/// Implementations must be `Send + Sync` for use across async tasks.
/// Methods return boxed futures for dyn-compatibility.
pub trait CountrySource: Send + Sync {
    /// Short human-readable label used in logs and errors.
    fn name(&self) -> &str;

    fn fetch(&self) -> BoxFuture<'_, Result<String, DataSourceError>>;
}

pub struct FilesystemSource {
    name: String,
    path: PathBuf,
}

impl FilesystemSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: format!("file {}", path.display()),
            path,
        }
    }
}

impl CountrySource for FilesystemSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, DataSourceError>> {
        Box::pin(async move {
            tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                DataSourceError::with_source(format!("failed to read {}", self.path.display()), e)
            })
        })
    }
}

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl CountrySource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, DataSourceError>> {
        Box::pin(async move {
            let resp = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| DataSourceError::with_source("HTTP request failed", e))?;

            if !resp.status().is_success() {
                return Err(DataSourceError::new(format!(
                    "HTTP error from {}: {}",
                    self.url,
                    resp.status()
                )));
            }

            resp.text()
                .await
                .map_err(|e| DataSourceError::with_source("Failed to read response", e))
        })
    }
}

/// In-memory payload; fetching fails until one is set.
pub struct MemorySource {
    payload: RwLock<Option<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            payload: RwLock::new(None),
        }
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RwLock::new(Some(payload.into())),
        }
    }

    pub async fn set_payload(&self, payload: impl Into<String>) {
        *self.payload.write().await = Some(payload.into());
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl CountrySource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, DataSourceError>> {
        Box::pin(async move {
            self.payload
                .read()
                .await
                .clone()
                .ok_or_else(|| DataSourceError::new("memory source has no payload"))
        })
    }
}

/// Tries each source in order and returns the first payload.
pub struct FallbackSource {
    sources: Vec<Arc<dyn CountrySource>>,
}

impl FallbackSource {
    pub fn new(sources: Vec<Arc<dyn CountrySource>>) -> Self {
        Self { sources }
    }
}

impl CountrySource for FallbackSource {
    fn name(&self) -> &str {
        "fallback"
    }

    fn fetch(&self) -> BoxFuture<'_, Result<String, DataSourceError>> {
        Box::pin(async move {
            let mut last_err = None;
            for source in &self.sources {
                match source.fetch().await {
                    Ok(payload) => return Ok(payload),
                    Err(e) => {
                        tracing::debug!("Fallback source {} failed: {e}", source.name());
                        last_err = Some(e);
                    }
                }
            }
            Err(last_err.unwrap_or_else(|| DataSourceError::new("no country sources configured")))
        })
    }
}
