use foundation::math::Vec2;
use serde_json::{Map, Value};

use crate::error::FormatError;

/// Geographic geometry, coordinates in degrees (`x` = lon, `y` = lat).
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Polygon(Vec<Vec<Vec2>>),
    MultiPolygon(Vec<Vec<Vec<Vec2>>>),
    /// Any other geometry kind (or a null geometry), kept by name only.
    Other(String),
}

impl FeatureGeometry {
    pub fn kind(&self) -> &str {
        match self {
            FeatureGeometry::Polygon(_) => "Polygon",
            FeatureGeometry::MultiPolygon(_) => "MultiPolygon",
            FeatureGeometry::Other(kind) => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: FeatureGeometry,
}

impl Feature {
    /// ISO 3166-1 numeric id from `id`, falling back to `properties.id`.
    /// Zero-padded strings such as `"036"` are accepted.
    pub fn numeric_id(&self) -> Option<u32> {
        if let Some(id) = self.id.as_deref().and_then(parse_numeric) {
            return Some(id);
        }
        match self.properties.get("id")? {
            Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(|v| v.as_str())
    }
}

fn parse_numeric(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FormatError> {
        let value: Value = serde_json::from_str(payload).map_err(FormatError::Json)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FormatError> {
        let obj = value.as_object().ok_or(FormatError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FormatError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FormatError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(FormatError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feature = parse_feature(feat_val)
                .map_err(|reason| FormatError::InvalidFeature { index, reason })?;
            features.push(feature);
        }

        Ok(Self { features })
    }
}

fn parse_feature(value: &Value) -> Result<Feature, String> {
    let feat_obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;

    let feat_type = feat_obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("feature missing type".to_string())?;
    if feat_type != "Feature" {
        return Err(format!("unexpected feature type: {feat_type}"));
    }

    let id = match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = feat_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => FeatureGeometry::Other("null".to_string()),
        Some(geom) => parse_geometry(geom)?,
    };

    Ok(Feature {
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<FeatureGeometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" => Ok(FeatureGeometry::Polygon(parse_polygon(coordinates(obj)?)?)),
        "MultiPolygon" => Ok(FeatureGeometry::MultiPolygon(parse_multi_polygon(
            coordinates(obj)?,
        )?)),
        other => Ok(FeatureGeometry::Other(other.to_string())),
    }
}

fn coordinates(obj: &Map<String, Value>) -> Result<&Value, String> {
    obj.get("coordinates")
        .ok_or("geometry missing coordinates".to_string())
}

fn parse_position(coords: &Value) -> Result<Vec2, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(Vec2::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Vec<Vec2>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Vec<Vec2>>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Vec<Vec2>>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}
