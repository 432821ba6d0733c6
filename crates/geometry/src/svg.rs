use std::fmt::Write as _;

use crate::multipolygon::MultiPolygon;

/// SVG path data with one `M … L … Z` subpath per non-empty ring, in
/// polygon-then-ring order. Empty input gives an empty string.
pub fn to_svg_path(mp: &MultiPolygon) -> String {
    let mut out = String::new();
    for ring in mp.rings() {
        let Some((first, rest)) = ring.split_first() else {
            continue;
        };
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "M{},{}", first.x, first.y);
        for p in rest {
            let _ = write!(out, " L{},{}", p.x, p.y);
        }
        out.push_str(" Z");
    }
    out
}
