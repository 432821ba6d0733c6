use std::collections::BTreeMap;

use formats::{Feature, FormatError, IsoTable, load_features_str};
use once_cell::sync::Lazy;

mod iso_3166;

pub use iso_3166::ISO_3166_1;

static BUNDLED_ISO: Lazy<IsoTable> = Lazy::new(|| ISO_3166_1.iter().copied().collect());

/// The ISO 3166-1 table compiled into the binary.
///
/// Built on first access and shared for the life of the process; safe to
/// call from any thread.
pub fn bundled_iso_table() -> &'static IsoTable {
    &BUNDLED_ISO
}

#[derive(Debug)]
pub enum CatalogError {
    Format(FormatError),
    /// The payload parsed but no feature carried a numeric country id.
    NoCountries,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Format(err) => write!(f, "country data unreadable: {err}"),
            CatalogError::NoCountries => write!(f, "country data has no features with numeric ids"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Format(err) => Some(err),
            CatalogError::NoCountries => None,
        }
    }
}

impl From<FormatError> for CatalogError {
    fn from(err: FormatError) -> Self {
        CatalogError::Format(err)
    }
}

/// Country features indexed by ISO numeric id, looked up by alpha-2 code.
#[derive(Debug, Clone, Default)]
pub struct CountryCatalog {
    by_numeric: BTreeMap<u32, Feature>,
    iso: IsoTable,
}

impl CountryCatalog {
    /// Features without a numeric id are skipped; on duplicate ids the later
    /// feature wins.
    pub fn new(features: impl IntoIterator<Item = Feature>, iso: IsoTable) -> Self {
        let mut by_numeric = BTreeMap::new();
        for feature in features {
            if let Some(id) = feature.numeric_id() {
                by_numeric.insert(id, feature);
            }
        }
        Self { by_numeric, iso }
    }

    /// Parses GeoJSON or TopoJSON (`object` names the TopoJSON object).
    pub fn from_payload(payload: &str, object: &str, iso: IsoTable) -> Result<Self, CatalogError> {
        let collection = load_features_str(payload, object)?;
        let catalog = Self::new(collection.features, iso);
        if catalog.is_empty() {
            return Err(CatalogError::NoCountries);
        }
        Ok(catalog)
    }

    /// Case-insensitive. Empty or unknown codes give `None`.
    pub fn find_by_iso(&self, alpha2: &str) -> Option<&Feature> {
        let numeric = self.iso.numeric(alpha2)?;
        self.by_numeric.get(&numeric)
    }

    pub fn find_by_numeric(&self, numeric: u32) -> Option<&Feature> {
        self.by_numeric.get(&numeric)
    }

    pub fn len(&self) -> usize {
        self.by_numeric.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_numeric.is_empty()
    }
}
