use serde_json::Value;
use topojson::{TopoJson, to_geojson};

use crate::error::FormatError;
use crate::feature::FeatureCollection;

/// Object holding the country shapes in world-atlas topologies.
pub const DEFAULT_OBJECT: &str = "countries";

/// Decodes a TopoJSON topology and converts its `object` into features.
pub fn from_topojson_str(payload: &str, object: &str) -> Result<FeatureCollection, FormatError> {
    let topo = payload
        .parse::<TopoJson>()
        .map_err(|e| FormatError::Topology(e.to_string()))?;
    let TopoJson::Topology(topology) = topo else {
        return Err(FormatError::NotATopology);
    };
    if !topology.objects.iter().any(|named| named.name == object) {
        return Err(FormatError::MissingObject(object.to_string()));
    }

    let collection =
        to_geojson(&topology, object).map_err(|e| FormatError::Topology(e.to_string()))?;
    // Round-trip through JSON so both formats share one feature parser.
    let value = serde_json::to_value(&collection).map_err(FormatError::Json)?;
    FeatureCollection::from_geojson_value(value)
}

/// Parses either a GeoJSON FeatureCollection or a TopoJSON Topology,
/// chosen by the top-level `type`. `object` is only used for topologies.
pub fn load_features_str(payload: &str, object: &str) -> Result<FeatureCollection, FormatError> {
    let value: Value = serde_json::from_str(payload).map_err(FormatError::Json)?;
    match value.get("type").and_then(|v| v.as_str()) {
        Some("Topology") => from_topojson_str(payload, object),
        _ => FeatureCollection::from_geojson_value(value),
    }
}
