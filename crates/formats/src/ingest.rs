use foundation::math::{Projection, Vec2};
use geometry::{MultiPolygon, Polygon, unwrap_polygon};

use crate::feature::{Feature, FeatureGeometry};

/// Converts a feature into a planar multipolygon.
///
/// Each ring is unwrapped across the antimeridian and then projected point
/// by point. Unprojectable points become `(NaN, NaN)` instead of failing the
/// conversion. Geometries other than Polygon / MultiPolygon give an empty
/// multipolygon.
pub fn feature_to_multipolygon<P>(feature: &Feature, projection: &P) -> MultiPolygon
where
    P: Projection + ?Sized,
{
    match &feature.geometry {
        FeatureGeometry::Polygon(rings) => {
            MultiPolygon::new(vec![project_polygon(rings, projection)])
        }
        FeatureGeometry::MultiPolygon(polys) => MultiPolygon::new(
            polys
                .iter()
                .map(|rings| project_polygon(rings, projection))
                .collect(),
        ),
        FeatureGeometry::Other(_) => MultiPolygon::default(),
    }
}

fn project_polygon<P>(rings: &[Vec<Vec2>], projection: &P) -> Polygon
where
    P: Projection + ?Sized,
{
    unwrap_polygon(rings)
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .map(|p| projection.project(p).unwrap_or(Vec2::NAN))
                .collect()
        })
        .collect()
}
