use foundation::math::Vec2;

use crate::multipolygon::{Polygon, Ring};

/// Removes ±180° longitude jumps from a geographic ring.
///
/// Walks the ring keeping a running offset: a raw step above +180° lowers it
/// by 360°, a step below -180° raises it. Steps are measured on the raw
/// longitudes, so the offset only changes at real seam crossings.
///
/// A closed input (more than two points, first == last) is unwrapped over its
/// distinct vertices and re-closed with the *unwrapped* first point, which
/// keeps the closing edge local. Open input stays open.
pub fn unwrap_ring(ring: &[Vec2]) -> Ring {
    let Some(first) = ring.first() else {
        return Vec::new();
    };

    let closed = ring.len() > 2 && ring.last() == Some(first);
    let n = if closed { ring.len() - 1 } else { ring.len() };

    let mut out = Vec::with_capacity(ring.len());
    let mut offset = 0.0;
    let mut prev_lon = first.x;
    for p in &ring[..n] {
        let d = p.x - prev_lon;
        if d > 180.0 {
            offset -= 360.0;
        } else if d < -180.0 {
            offset += 360.0;
        }
        out.push(Vec2::new(p.x + offset, p.y));
        prev_lon = p.x;
    }

    if closed {
        out.push(out[0]);
    }
    out
}

/// Unwraps every ring of a polygon independently.
pub fn unwrap_polygon(poly: &[Ring]) -> Polygon {
    poly.iter().map(|ring| unwrap_ring(ring)).collect()
}

#[cfg(test)]
mod tests {
    use super::{unwrap_polygon, unwrap_ring};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Vec2> {
        coords.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    #[test]
    fn ring_without_jumps_is_unchanged() {
        let open = pts(&[(10.0, 0.0), (20.0, 5.0), (15.0, 10.0)]);
        assert_eq!(unwrap_ring(&open), open);

        let closed = pts(&[(-170.0, 0.0), (170.0, 0.0), (170.0, 10.0), (-170.0, 0.0)]);
        let once = unwrap_ring(&closed);
        assert_eq!(unwrap_ring(&once), once);
    }

    #[test]
    fn antimeridian_crossing_is_continuous() {
        let ring = pts(&[(178.0, 0.0), (179.0, 1.0), (-179.0, 2.0), (-178.0, 3.0)]);
        let out = unwrap_ring(&ring);
        assert_eq!(out, pts(&[(178.0, 0.0), (179.0, 1.0), (181.0, 2.0), (182.0, 3.0)]));
        for w in out.windows(2) {
            assert!((w[1].x - w[0].x).abs() <= 180.0);
            assert!(w[1].x > w[0].x);
        }
    }

    #[test]
    fn westward_crossing_adds_offset() {
        let ring = pts(&[(-179.0, 0.0), (179.0, 0.0), (178.0, 1.0)]);
        assert_eq!(unwrap_ring(&ring), pts(&[(-179.0, 0.0), (-181.0, 0.0), (-182.0, 1.0)]));
    }

    #[test]
    fn closed_ring_is_reclosed_with_unwrapped_start() {
        let ring = pts(&[
            (170.0, 0.0),
            (179.0, 0.0),
            (-179.0, 0.0),
            (-170.0, 5.0),
            (170.0, 0.0),
        ]);
        let out = unwrap_ring(&ring);
        assert_eq!(
            out,
            pts(&[
                (170.0, 0.0),
                (179.0, 0.0),
                (181.0, 0.0),
                (190.0, 5.0),
                (170.0, 0.0),
            ])
        );
        assert_eq!(out.len(), ring.len());
    }

    #[test]
    fn open_ring_gets_no_closing_point() {
        let ring = pts(&[(170.0, 0.0), (-170.0, 0.0), (-170.0, 5.0)]);
        let out = unwrap_ring(&ring);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], Vec2::new(190.0, 5.0));
    }

    #[test]
    fn degenerate_rings() {
        assert!(unwrap_ring(&[]).is_empty());
        assert_eq!(unwrap_ring(&pts(&[(5.0, 5.0)])), pts(&[(5.0, 5.0)]));
        // two equal points are not treated as a closed ring
        assert_eq!(
            unwrap_ring(&pts(&[(5.0, 5.0), (5.0, 5.0)])),
            pts(&[(5.0, 5.0), (5.0, 5.0)])
        );
    }

    #[test]
    fn polygon_rings_are_unwrapped_independently() {
        let poly = vec![
            pts(&[(179.0, 0.0), (-179.0, 0.0)]),
            pts(&[(-179.0, 1.0), (-178.0, 1.0)]),
        ];
        let out = unwrap_polygon(&poly);
        assert_eq!(out[0], pts(&[(179.0, 0.0), (181.0, 0.0)]));
        assert_eq!(out[1], poly[1]);
    }
}
