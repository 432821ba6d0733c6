use foundation::math::{Projection, Vec2};
use formats::{Feature, feature_to_multipolygon};
use geometry::{
    CanvasFit, MultiPolygon, UnionPrimitive, compose_overlay, keep_largest_polygon, to_svg_path,
    try_union,
};
use tracing::debug;

use crate::document::SvgDocument;
use crate::error::RenderError;
use crate::options::RenderOptions;

/// Intermediate values of a two-country merge, for logging and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub area_a: f64,
    pub area_b: f64,
    pub scale_a: f64,
    pub scale_b: f64,
    /// Shared centroid of the overlaid bodies, before fitting.
    pub center: Vec2,
    /// `None` when the union failed and the fit used both bodies instead.
    pub union_area: Option<f64>,
    pub fit_scale: f64,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub svg: String,
    /// Present only when two countries were merged.
    pub report: Option<MergeReport>,
}

/// Projected, ring-closed mainland of a country feature.
pub fn mainland<P>(feature: &Feature, projection: &P) -> MultiPolygon
where
    P: Projection + ?Sized,
{
    let projected = feature_to_multipolygon(feature, projection).close_rings();
    keep_largest_polygon(&projected)
}

/// Renders the mainland silhouette of one country, fitted to the canvas.
///
/// Fails with [`RenderError::EmptyOutline`] when there is nothing to draw,
/// unless `opts.debug` is set, in which case an empty document is returned.
pub fn render_country(feature: &Feature, opts: &RenderOptions) -> Result<String, RenderError> {
    let svg = render_single(feature, opts);
    if svg.path_is_empty && !opts.debug {
        return Err(RenderError::EmptyOutline);
    }
    Ok(svg.document)
}

/// Renders the union of two countries after equalizing their areas and
/// overlaying them on a shared centroid.
///
/// With `b` absent this draws `a` alone and never fails. A failed union is
/// an error unless `opts.debug` is set; debug renders always carry both
/// overlaid outlines as grey hairlines beneath the union.
pub fn render_merge<U>(
    a: &Feature,
    b: Option<&Feature>,
    opts: &RenderOptions,
    union: &U,
) -> Result<MergeOutcome, RenderError>
where
    U: UnionPrimitive + ?Sized,
{
    let Some(b) = b else {
        return Ok(MergeOutcome {
            svg: render_single(a, opts).document,
            report: None,
        });
    };

    let projection = opts.projection();
    let main_a = mainland(a, &projection);
    let main_b = mainland(b, &projection);
    let area_a = main_a.area();
    let area_b = main_b.area();

    let overlay = compose_overlay(&main_a, &main_b);
    let merged = try_union(union, &overlay.a, &overlay.b);

    let fit = match &merged {
        Some(u) => CanvasFit::new(u, opts.canvas()),
        None => CanvasFit::new(&overlay.combined(), opts.canvas()),
    };

    let mut doc = SvgDocument::new(opts.width, opts.height);
    if opts.debug {
        doc.hairline(&to_svg_path(&fit.apply(&overlay.a)));
        doc.hairline(&to_svg_path(&fit.apply(&overlay.b)));
    }
    if let Some(u) = &merged {
        doc.path(
            &to_svg_path(&fit.apply(u)),
            &opts.fill,
            &opts.stroke,
            opts.stroke_width,
        );
    }

    let report = MergeReport {
        area_a,
        area_b,
        scale_a: overlay.scale_a,
        scale_b: overlay.scale_b,
        center: overlay.center,
        union_area: merged.as_ref().map(MultiPolygon::area),
        fit_scale: fit.scale,
    };
    debug!(?report, "merged countries");

    if merged.is_none() && !opts.debug {
        return Err(RenderError::UnionFailed);
    }
    Ok(MergeOutcome {
        svg: doc.finish(),
        report: Some(report),
    })
}

struct SingleRender {
    document: String,
    path_is_empty: bool,
}

fn render_single(feature: &Feature, opts: &RenderOptions) -> SingleRender {
    let shape = mainland(feature, &opts.projection());
    let fit = CanvasFit::new(&shape, opts.canvas());
    let path = to_svg_path(&fit.apply(&shape));
    debug!(area = shape.area(), scale = fit.scale, "rendering country");

    let mut doc = SvgDocument::new(opts.width, opts.height);
    if !path.is_empty() {
        doc.path(&path, &opts.fill, &opts.stroke, opts.stroke_width);
    }
    SingleRender {
        document: doc.finish(),
        path_is_empty: path.is_empty(),
    }
}
