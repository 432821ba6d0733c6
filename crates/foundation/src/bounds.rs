use crate::math::Vec2;

/// Axis-aligned bounding box in the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    /// Bounds of every finite point yielded, or `None` when there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
        let mut any = false;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            any = true;
            if p.x < min[0] {
                min[0] = p.x;
            }
            if p.y < min[1] {
                min[1] = p.y;
            }
            if p.x > max[0] {
                max[0] = p.x;
            }
            if p.y > max[1] {
                max[1] = p.y;
            }
        }
        any.then_some(Aabb2 { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;
    use crate::math::Vec2;

    #[test]
    fn bounds_of_points() {
        let b = Aabb2::from_points([
            Vec2::new(1.0, -2.0),
            Vec2::new(-3.0, 4.0),
            Vec2::new(0.5, 0.5),
        ])
        .unwrap();
        assert_eq!(b, Aabb2::new([-3.0, -2.0], [1.0, 4.0]));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
        assert_eq!(b.center(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn empty_input_has_no_bounds() {
        assert!(Aabb2::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn nan_points_are_ignored() {
        let b = Aabb2::from_points([Vec2::NAN, Vec2::new(2.0, 3.0)]).unwrap();
        assert_eq!(b, Aabb2::new([2.0, 3.0], [2.0, 3.0]));
        assert!(Aabb2::from_points([Vec2::NAN]).is_none());
    }
}
