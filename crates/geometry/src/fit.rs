use foundation::bounds::Aabb2;
use foundation::math::Vec2;

use crate::multipolygon::MultiPolygon;

pub const DEFAULT_PAD: f64 = 16.0;

/// Target drawing surface. The drawable area is the canvas minus `pad` on
/// every side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub pad: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64, pad: f64) -> Self {
        Self { width, height, pad }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn drawable_width(&self) -> f64 {
        self.width - 2.0 * self.pad
    }

    pub fn drawable_height(&self) -> f64 {
        self.height - 2.0 * self.pad
    }
}

/// Uniform scale plus translation that fits a basis shape's bounding box
/// into a canvas, centered.
///
/// The same fit can be applied to other shapes so they share the basis'
/// framing (e.g. the two overlaid bodies fitted by their union's extent).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasFit {
    pub scale: f64,
    pub source_center: Vec2,
    pub target_center: Vec2,
}

impl CanvasFit {
    pub fn new(basis: &MultiPolygon, canvas: Canvas) -> Self {
        let bounds = basis
            .bounds()
            .unwrap_or(Aabb2::new([0.0, 0.0], [0.0, 0.0]));
        let bw = bounds.width().max(1.0);
        let bh = bounds.height().max(1.0);

        let sx = canvas.drawable_width() / bw;
        let sy = canvas.drawable_height() / bh;

        Self {
            scale: sx.min(sy),
            source_center: bounds.center(),
            target_center: canvas.center(),
        }
    }

    pub fn apply_point(&self, p: Vec2) -> Vec2 {
        (p - self.source_center).scale(self.scale) + self.target_center
    }

    pub fn apply(&self, mp: &MultiPolygon) -> MultiPolygon {
        mp.transform(|p| self.apply_point(p))
    }
}

/// Fits `mp` into `canvas` by its own extent.
pub fn center_and_scale(mp: &MultiPolygon, canvas: Canvas) -> MultiPolygon {
    CanvasFit::new(mp, canvas).apply(mp)
}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasFit, center_and_scale};
    use crate::multipolygon::MultiPolygon;
    use foundation::bounds::Aabb2;
    use foundation::math::Vec2;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> MultiPolygon {
        MultiPolygon::new(vec![vec![vec![
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
            Vec2::new(x, y),
        ]]])
    }

    #[test]
    fn ten_unit_square_fills_hundred_pixel_canvas() {
        let square = rect(-3.0, 7.0, 10.0, 10.0);
        let fit = CanvasFit::new(&square, Canvas::new(100.0, 100.0, 0.0));
        assert_eq!(fit.scale, 10.0);

        let fitted = fit.apply(&square);
        assert_eq!(fitted.bounds(), Some(Aabb2::new([0.0, 0.0], [100.0, 100.0])));
        assert_eq!(fitted.bounds().unwrap().center(), Vec2::new(50.0, 50.0));
        assert_eq!(fitted.centroid(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn aspect_ratio_is_preserved_with_padding() {
        let wide = rect(0.0, 0.0, 20.0, 5.0);
        let fitted = center_and_scale(&wide, Canvas::new(800.0, 520.0, 16.0));
        let b = fitted.bounds().unwrap();
        // limited by width: (800 - 32) / 20
        assert_close(b.width(), 768.0, 1e-9);
        assert_close(b.height(), 192.0, 1e-9);
        assert_close(b.center().x, 400.0, 1e-9);
        assert_close(b.center().y, 260.0, 1e-9);
    }

    #[test]
    fn fit_is_shared_across_shapes() {
        let basis = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(0.0, 0.0, 5.0, 5.0);
        let fit = CanvasFit::new(&basis, Canvas::new(100.0, 100.0, 0.0));
        let b = fit.apply(&inner).bounds().unwrap();
        assert_eq!(b, Aabb2::new([0.0, 0.0], [50.0, 50.0]));
    }

    #[test]
    fn tiny_bbox_is_floored_to_one_unit() {
        let dot = rect(2.0, 2.0, 0.0, 0.0);
        let fit = CanvasFit::new(&dot, Canvas::new(100.0, 60.0, 5.0));
        assert_eq!(fit.scale, 50.0);
        assert_eq!(fit.apply_point(Vec2::new(2.0, 2.0)), Vec2::new(50.0, 30.0));
    }

    #[test]
    fn degenerate_canvas_and_empty_shape_stay_finite() {
        let fit = CanvasFit::new(&rect(0.0, 0.0, 4.0, 4.0), Canvas::new(10.0, 10.0, 20.0));
        assert!(fit.scale.is_finite());
        assert!(fit.scale < 0.0);

        let empty = CanvasFit::new(&MultiPolygon::default(), Canvas::new(100.0, 100.0, 0.0));
        assert!(empty.scale.is_finite());
        assert!(empty.apply_point(Vec2::new(1.0, 1.0)).is_finite());
        assert!(center_and_scale(&MultiPolygon::default(), Canvas::new(1.0, 1.0, 0.0)).is_empty());
    }
}
