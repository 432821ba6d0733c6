//! Offline rendering behind the `collide` command: the same SVGs as the
//! HTTP service, from local data files.

use std::fs;
use std::path::{Path, PathBuf};

use catalog::{CatalogError, CountryCatalog, bundled_iso_table};
use formats::{FormatError, IsoTable};
use geometry::GeoUnion;
use render::{RenderError, RenderOptions, render_country, render_merge};
use tracing::info;

#[derive(Debug)]
pub enum ToolError {
    Io { path: PathBuf, source: std::io::Error },
    IsoTable(FormatError),
    Catalog(CatalogError),
    NotFound(String),
    Render(RenderError),
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            ToolError::IsoTable(err) => write!(f, "ISO table: {err}"),
            ToolError::Catalog(err) => write!(f, "{err}"),
            ToolError::NotFound(code) => write!(f, "Country not found: {code}"),
            ToolError::Render(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Io { source, .. } => Some(source),
            ToolError::IsoTable(err) => Some(err),
            ToolError::Catalog(err) => Some(err),
            ToolError::NotFound(_) => None,
            ToolError::Render(err) => Some(err),
        }
    }
}

fn read(path: &Path) -> Result<String, ToolError> {
    fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads countries from a GeoJSON or TopoJSON file. Without `iso`, the
/// bundled ISO 3166-1 table is used.
pub fn load_catalog(
    countries: &Path,
    iso: Option<&Path>,
    object: &str,
) -> Result<CountryCatalog, ToolError> {
    let table = match iso {
        Some(path) => IsoTable::from_json_str(&read(path)?).map_err(ToolError::IsoTable)?,
        None => bundled_iso_table().clone(),
    };
    let catalog = CountryCatalog::from_payload(&read(countries)?, object, table)
        .map_err(ToolError::Catalog)?;
    info!("loaded {} countries from {}", catalog.len(), countries.display());
    Ok(catalog)
}

pub fn country_svg(
    catalog: &CountryCatalog,
    a: &str,
    opts: &RenderOptions,
) -> Result<String, ToolError> {
    let feature = catalog
        .find_by_iso(a)
        .ok_or_else(|| ToolError::NotFound(a.to_string()))?;
    render_country(feature, opts).map_err(ToolError::Render)
}

pub fn merge_svg(
    catalog: &CountryCatalog,
    a: &str,
    b: &str,
    opts: &RenderOptions,
) -> Result<String, ToolError> {
    let fa = catalog
        .find_by_iso(a)
        .ok_or_else(|| ToolError::NotFound(a.to_string()))?;
    let fb = catalog
        .find_by_iso(b)
        .ok_or_else(|| ToolError::NotFound(b.to_string()))?;
    let outcome = render_merge(fa, Some(fb), opts, &GeoUnion).map_err(ToolError::Render)?;
    if let Some(report) = &outcome.report {
        info!(
            area_a = report.area_a,
            area_b = report.area_b,
            unioned = report.union_area.is_some(),
            "merged {a} and {b}"
        );
    }
    Ok(outcome.svg)
}
