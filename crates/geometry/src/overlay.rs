use foundation::math::Vec2;
use tracing::debug;

use crate::multipolygon::MultiPolygon;

/// Two bodies scaled to equal area and moved onto a shared centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub a: MultiPolygon,
    pub b: MultiPolygon,
    /// Common centroid of both transformed bodies.
    pub center: Vec2,
    pub scale_a: f64,
    pub scale_b: f64,
}

impl Overlay {
    /// Both bodies as one multipolygon, `a` first.
    pub fn combined(&self) -> MultiPolygon {
        self.a.concat(&self.b)
    }
}

/// Equalizes the areas of `a` and `b` and overlays them.
///
/// Each body is scaled about its own centroid by `sqrt(target / area)` where
/// `target` is the larger of the two areas, so the bigger body keeps its
/// size. The scaled bodies are then translated so both centroids land on the
/// midpoint of their scaled centroids. Zero (or NaN) areas count as 1.
pub fn compose_overlay(a: &MultiPolygon, b: &MultiPolygon) -> Overlay {
    let area_a = nonzero_or_one(a.area());
    let area_b = nonzero_or_one(b.area());
    let c_a = a.centroid();
    let c_b = b.centroid();

    let target_area = area_a.max(area_b);
    let scale_a = (target_area / area_a).sqrt();
    let scale_b = (target_area / area_b).sqrt();
    debug!(area_a, area_b, scale_a, scale_b, "equalizing overlay areas");

    let a2 = a.scaled_around(c_a, scale_a);
    let b2 = b.scaled_around(c_b, scale_b);

    let c_a2 = a2.centroid();
    let c_b2 = b2.centroid();
    let center = c_a2.midpoint(c_b2);

    Overlay {
        a: a2.translated(center - c_a2),
        b: b2.translated(center - c_b2),
        center,
        scale_a,
        scale_b,
    }
}

fn nonzero_or_one(area: f64) -> f64 {
    if area == 0.0 || area.is_nan() {
        1.0
    } else {
        area
    }
}
