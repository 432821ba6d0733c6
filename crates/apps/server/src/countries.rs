use std::sync::Arc;

use catalog::CountryCatalog;
use formats::IsoTable;
use tokio::sync::OnceCell;
use tracing::info;

use crate::data_sources::{CountrySource, DataSourceError};

/// Country catalog loaded from a source on first use and kept for the life
/// of the process. A failed load leaves the cell empty, so the next caller
/// retries.
pub struct CountryData {
    source: Arc<dyn CountrySource>,
    object: String,
    iso: IsoTable,
    catalog: OnceCell<CountryCatalog>,
}

impl CountryData {
    pub fn new(source: Arc<dyn CountrySource>, object: impl Into<String>, iso: IsoTable) -> Self {
        Self {
            source,
            object: object.into(),
            iso,
            catalog: OnceCell::new(),
        }
    }

    pub async fn catalog(&self) -> Result<&CountryCatalog, DataSourceError> {
        self.catalog
            .get_or_try_init(|| async {
                let payload = self.source.fetch().await?;
                let catalog = CountryCatalog::from_payload(&payload, &self.object, self.iso.clone())
                    .map_err(|e| {
                        DataSourceError::with_source(
                            format!("unusable country data from {}", self.source.name()),
                            e,
                        )
                    })?;
                info!(
                    countries = catalog.len(),
                    source = self.source.name(),
                    "country data loaded"
                );
                Ok(catalog)
            })
            .await
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.initialized()
    }
}
