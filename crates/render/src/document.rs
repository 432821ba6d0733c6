use std::borrow::Cow;
use std::fmt::Write as _;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stroke used for the overlaid outlines in debug renders.
pub const HAIRLINE_STROKE: &str = "#bbb";

/// Minimal SVG document: a sized root element holding `<path>` elements.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    body: String,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    pub fn path(&mut self, d: &str, fill: &str, stroke: &str, stroke_width: f64) -> &mut Self {
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            escape_attr(d),
            escape_attr(fill),
            escape_attr(stroke),
            stroke_width
        );
        self
    }

    /// Unfilled grey outline.
    pub fn hairline(&mut self, d: &str) -> &mut Self {
        self.path(d, "none", HAIRLINE_STROKE, 1.0)
    }

    pub fn finish(&self) -> String {
        format!(
            r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Escapes the five XML special characters for use inside a quoted attribute.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::{SvgDocument, escape_attr};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_has_sized_root() {
        assert_eq!(
            SvgDocument::new(800.0, 520.0).finish(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="520" viewBox="0 0 800 520"></svg>"#
        );
    }

    #[test]
    fn paths_are_appended_in_order() {
        let mut doc = SvgDocument::new(10.0, 10.0);
        doc.hairline("M0,0 L1,0 Z").path("M1,1 L2,2 Z", "white", "#111", 2.5);
        assert_eq!(
            doc.finish(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">"#,
                r##"<path d="M0,0 L1,0 Z" fill="none" stroke="#bbb" stroke-width="1"/>"##,
                r##"<path d="M1,1 L2,2 Z" fill="white" stroke="#111" stroke-width="2.5"/>"##,
                "</svg>"
            )
        );
    }

    #[test]
    fn attributes_are_escaped() {
        assert_eq!(escape_attr("#111"), "#111");
        assert_eq!(
            escape_attr(r#"red" onload="x()"#),
            "red&quot; onload=&quot;x()"
        );
        assert_eq!(escape_attr("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");

        let mut doc = SvgDocument::new(1.0, 1.0);
        doc.path("", "a&b", "\"", 0.0);
        assert!(doc.finish().contains(r#"fill="a&amp;b" stroke="&quot;""#));
    }
}
