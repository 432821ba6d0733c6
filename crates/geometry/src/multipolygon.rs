use foundation::bounds::Aabb2;
use foundation::math::Vec2;

/// A closed curve. May arrive open or closed (first point repeated last).
pub type Ring = Vec<Vec2>;

/// Outer boundary first, holes after.
pub type Polygon = Vec<Ring>;

/// One country's shape in a single coordinate space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.0
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.0.iter().flat_map(|poly| poly.iter())
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.rings().flat_map(|ring| ring.iter().copied())
    }

    /// Applies `f` to every coordinate, keeping polygon and ring structure.
    pub fn transform(&self, f: impl Fn(Vec2) -> Vec2) -> MultiPolygon {
        MultiPolygon(
            self.0
                .iter()
                .map(|poly| {
                    poly.iter()
                        .map(|ring| ring.iter().map(|&p| f(p)).collect())
                        .collect()
                })
                .collect(),
        )
    }

    /// Uniform scale by `s` about `center`.
    pub fn scaled_around(&self, center: Vec2, s: f64) -> MultiPolygon {
        self.transform(|p| center + (p - center).scale(s))
    }

    pub fn translated(&self, offset: Vec2) -> MultiPolygon {
        self.transform(|p| p + offset)
    }

    /// Appends the first point to every non-empty ring that does not already
    /// end on it.
    pub fn close_rings(&self) -> MultiPolygon {
        MultiPolygon(
            self.0
                .iter()
                .map(|poly| poly.iter().map(|ring| close_ring(ring)).collect())
                .collect(),
        )
    }

    /// Both shapes' polygons, `self` first.
    pub fn concat(&self, other: &MultiPolygon) -> MultiPolygon {
        let mut polygons = self.0.clone();
        polygons.extend(other.0.iter().cloned());
        MultiPolygon(polygons)
    }

    pub fn bounds(&self) -> Option<Aabb2> {
        Aabb2::from_points(self.points())
    }
}

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self(polygons)
    }
}

pub fn close_ring(ring: &[Vec2]) -> Ring {
    let mut out = ring.to_vec();
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last())
        && first != last
    {
        out.push(first);
    }
    out
}
