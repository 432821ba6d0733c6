//! Shoelace area and centroid.
//!
//! Rings are traversed as closed: segment `i` joins vertex `i` and `i + 1`
//! for `i < len - 1`, so an open ring silently loses its closing edge. Call
//! [`MultiPolygon::close_rings`] first when the input may be open.

use foundation::math::Vec2;

use crate::multipolygon::{MultiPolygon, Ring};

/// Signed shoelace area. Positive for counter-clockwise rings in a y-up
/// frame. Rings with fewer than two points have zero area.
pub fn ring_signed_area(ring: &[Vec2]) -> f64 {
    let a: f64 = ring.windows(2).map(|w| w[0].cross(w[1])).sum();
    a / 2.0
}

/// Polygon centroid from the shoelace terms.
///
/// Zero-area rings (collinear, single point) fall back to their first vertex;
/// an empty ring yields the origin.
pub fn ring_centroid(ring: &[Vec2]) -> Vec2 {
    let mut a = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for w in ring.windows(2) {
        let (p, q) = (w[0], w[1]);
        let cross = p.cross(q);
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    a *= 0.5;
    if a == 0.0 {
        return ring.first().copied().unwrap_or(Vec2::ZERO);
    }
    Vec2::new(cx / (6.0 * a), cy / (6.0 * a))
}

/// Net area of a polygon: the signed ring areas are summed and the magnitude
/// taken once. Holes only subtract when they wind opposite to the outer ring.
pub fn polygon_net_area(poly: &[Ring]) -> f64 {
    poly.iter()
        .map(|ring| ring_signed_area(ring))
        .sum::<f64>()
        .abs()
}

/// Sum of every ring's signed area across all polygons, magnitude taken once.
pub fn multipolygon_area(mp: &MultiPolygon) -> f64 {
    mp.rings()
        .map(|ring| ring_signed_area(ring))
        .sum::<f64>()
        .abs()
}

/// Ring centroids averaged with their signed areas as weights.
///
/// With zero total weight the first coordinate stands in; a shape without
/// any coordinates yields the origin.
pub fn multipolygon_centroid(mp: &MultiPolygon) -> Vec2 {
    let mut a_total = 0.0;
    let mut cx_total = 0.0;
    let mut cy_total = 0.0;
    for ring in mp.rings() {
        let a = ring_signed_area(ring);
        let c = ring_centroid(ring);
        a_total += a;
        cx_total += c.x * a;
        cy_total += c.y * a;
    }
    if a_total == 0.0 {
        return mp.points().next().unwrap_or(Vec2::ZERO);
    }
    Vec2::new(cx_total / a_total, cy_total / a_total)
}

impl MultiPolygon {
    pub fn area(&self) -> f64 {
        multipolygon_area(self)
    }

    pub fn centroid(&self) -> Vec2 {
        multipolygon_centroid(self)
    }
}
