use std::panic::{AssertUnwindSafe, catch_unwind};

use foundation::math::Vec2;
use geo::{BooleanOps, LineString, MultiPolygon as GeoMultiPolygon, Polygon as GeoPolygon};
use tracing::warn;

use crate::multipolygon::{MultiPolygon, Polygon, Ring};

#[derive(Debug, Clone, PartialEq)]
pub enum UnionError {
    /// An input coordinate was NaN or infinite.
    NonFiniteInput,
    Primitive(String),
}

impl std::fmt::Display for UnionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnionError::NonFiniteInput => write!(f, "union input has non-finite coordinates"),
            UnionError::Primitive(msg) => write!(f, "union failed: {msg}"),
        }
    }
}

impl std::error::Error for UnionError {}

/// Planar boolean union of two polygon sets.
///
/// Implementations may return an error or panic on malformed input;
/// [`try_union`] turns both into `None`.
pub trait UnionPrimitive {
    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<MultiPolygon, UnionError>;
}

/// Union backed by `geo`'s `BooleanOps`.
#[derive(Debug, Default, Copy, Clone)]
pub struct GeoUnion;

impl UnionPrimitive for GeoUnion {
    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<MultiPolygon, UnionError> {
        if !a.points().chain(b.points()).all(Vec2::is_finite) {
            return Err(UnionError::NonFiniteInput);
        }
        let merged = to_geo(a).union(&to_geo(b));
        Ok(from_geo(&merged))
    }
}

/// Best-effort union: failures, panics and empty results all come back as
/// `None` so the caller can fall back to the un-merged shapes.
pub fn try_union<U>(primitive: &U, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon>
where
    U: UnionPrimitive + ?Sized,
{
    match catch_unwind(AssertUnwindSafe(|| primitive.union(a, b))) {
        Ok(Ok(merged)) if !merged.is_empty() => Some(merged),
        Ok(Ok(_)) => {
            warn!("union produced no polygons");
            None
        }
        Ok(Err(err)) => {
            warn!("{err}");
            None
        }
        Err(_) => {
            warn!("union primitive panicked");
            None
        }
    }
}

/// [`try_union`] with the default [`GeoUnion`] primitive.
pub fn union(a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
    try_union(&GeoUnion, a, b)
}

fn to_geo(mp: &MultiPolygon) -> GeoMultiPolygon<f64> {
    GeoMultiPolygon::new(
        mp.polygons()
            .iter()
            .filter_map(|poly| {
                let (outer, holes) = poly.split_first()?;
                Some(GeoPolygon::new(
                    ring_to_line_string(outer),
                    holes.iter().map(|h| ring_to_line_string(h)).collect(),
                ))
            })
            .collect(),
    )
}

fn ring_to_line_string(ring: &[Vec2]) -> LineString<f64> {
    LineString::from(ring.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>())
}

fn from_geo(mp: &GeoMultiPolygon<f64>) -> MultiPolygon {
    MultiPolygon::new(
        mp.0.iter()
            .map(|poly| {
                let mut rings: Polygon = Vec::with_capacity(1 + poly.interiors().len());
                rings.push(line_string_to_ring(poly.exterior()));
                rings.extend(poly.interiors().iter().map(line_string_to_ring));
                rings
            })
            .collect(),
    )
}

fn line_string_to_ring(ls: &LineString<f64>) -> Ring {
    ls.coords().map(|c| Vec2::new(c.x, c.y)).collect()
}
