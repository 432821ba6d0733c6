#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The country converted to an empty outline (no drawable rings).
    EmptyOutline,
    /// The two overlaid countries could not be unioned.
    UnionFailed,
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::EmptyOutline => {
                write!(f, "Country outline is empty. Try debug=1 to inspect outlines.")
            }
            RenderError::UnionFailed => write!(
                f,
                "Union failed for these inputs. Try debug=1 to inspect outlines."
            ),
        }
    }
}

impl std::error::Error for RenderError {}
