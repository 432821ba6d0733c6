use foundation::math::EqualEarth;
use geometry::{Canvas, DEFAULT_PAD};

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 520.0;
pub const DEFAULT_STROKE: &str = "#111";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_FILL: &str = "white";

/// Canvas size and styling for one rendered SVG.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    pub pad: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
    /// Draw the overlaid outlines too, and never fail on a missing outline.
    pub debug: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pad: DEFAULT_PAD,
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: DEFAULT_FILL.to_string(),
            debug: false,
        }
    }
}

impl RenderOptions {
    /// Non-finite numbers fall back to their defaults, then width and height
    /// are clamped to at least 1 and pad and stroke width to at least 0.
    /// Empty colors fall back to the default colors.
    pub fn sanitized(self) -> Self {
        Self {
            width: finite_or(self.width, DEFAULT_WIDTH).max(1.0),
            height: finite_or(self.height, DEFAULT_HEIGHT).max(1.0),
            pad: finite_or(self.pad, DEFAULT_PAD).max(0.0),
            stroke: non_empty_or(self.stroke, DEFAULT_STROKE),
            stroke_width: finite_or(self.stroke_width, DEFAULT_STROKE_WIDTH).max(0.0),
            fill: non_empty_or(self.fill, DEFAULT_FILL),
            debug: self.debug,
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height, self.pad)
    }

    /// Equal Earth sized to the canvas.
    pub fn projection(&self) -> EqualEarth {
        EqualEarth::for_canvas(self.width, self.height)
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}
