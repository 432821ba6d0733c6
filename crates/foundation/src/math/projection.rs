use super::Vec2;

/// Maps a geographic point (`x` = longitude, `y` = latitude, degrees) into
/// the plane. `None` signals an unprojectable point.
pub trait Projection {
    fn project(&self, lon_lat: Vec2) -> Option<Vec2>;
}

impl<F> Projection for F
where
    F: Fn(Vec2) -> Option<Vec2>,
{
    fn project(&self, lon_lat: Vec2) -> Option<Vec2> {
        self(lon_lat)
    }
}

const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;

/// Equal Earth pseudo-cylindrical equal-area projection.
///
/// Output is in screen orientation: `y` grows southwards. Longitudes are
/// used as given and never wrapped back into [-180, 180], so an unwrapped
/// ring stays continuous across the antimeridian.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EqualEarth {
    pub scale: f64,
    pub translate: Vec2,
}

impl EqualEarth {
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    /// Centered on a `width` x `height` canvas, scaled to `min(width, height) * 0.32`.
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self::new(
            width.min(height) * 0.32,
            Vec2::new(width / 2.0, height / 2.0),
        )
    }

    /// Unit-sphere projection, radians in and out.
    pub fn raw(lambda: f64, phi: f64) -> (f64, f64) {
        let m = 3f64.sqrt() / 2.0;
        let l = (m * phi.sin()).asin();
        let l2 = l * l;
        let l6 = l2 * l2 * l2;
        let x = lambda * l.cos() / (m * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2)));
        let y = l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2));
        (x, y)
    }
}

impl Projection for EqualEarth {
    fn project(&self, lon_lat: Vec2) -> Option<Vec2> {
        if !lon_lat.is_finite() {
            return None;
        }
        let (x, y) = Self::raw(lon_lat.x.to_radians(), lon_lat.y.to_radians());
        let out = Vec2::new(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        );
        out.is_finite().then_some(out)
    }
}
