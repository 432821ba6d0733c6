use crate::metrics::polygon_net_area;
use crate::multipolygon::MultiPolygon;

/// Default area ratio below which an island is dropped.
pub const DEFAULT_MIN_ISLAND_RATIO: f64 = 0.03;

/// Keeps only the polygon with the largest net area (the mainland).
/// Ties go to the first polygon; empty input comes back unchanged.
pub fn keep_largest_polygon(mp: &MultiPolygon) -> MultiPolygon {
    let mut polygons = mp.polygons().iter();
    let Some(first) = polygons.next() else {
        return mp.clone();
    };

    let mut best = first;
    let mut best_area = polygon_net_area(first);
    for poly in polygons {
        let a = polygon_net_area(poly);
        if a > best_area {
            best = poly;
            best_area = a;
        }
    }
    MultiPolygon::new(vec![best.clone()])
}

/// Drops polygons whose net area is below `min_ratio` times the largest one.
/// Surviving polygons keep their order.
pub fn drop_small_islands(mp: &MultiPolygon, min_ratio: f64) -> MultiPolygon {
    let areas: Vec<f64> = mp.polygons().iter().map(|p| polygon_net_area(p)).collect();
    let max_area = areas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let threshold = min_ratio * max_area;

    MultiPolygon::new(
        mp.polygons()
            .iter()
            .zip(&areas)
            .filter(|(_, a)| **a >= threshold)
            .map(|(p, _)| p.clone())
            .collect(),
    )
}
