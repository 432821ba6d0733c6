//! Request-scoped rendering: country features in, SVG documents out.

pub mod document;
pub mod error;
pub mod options;
pub mod pipeline;

pub use document::*;
pub use error::*;
pub use options::*;
pub use pipeline::*;
