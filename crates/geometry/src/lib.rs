//! Planar multipolygon engine used to draw country silhouettes.
//!
//! Every operation is a pure function over immutable inputs and returns a
//! fresh value; nothing here performs I/O.

pub mod fit;
pub mod metrics;
pub mod multipolygon;
pub mod overlay;
pub mod select;
pub mod svg;
pub mod union;
pub mod unwrap;

pub use fit::*;
pub use metrics::*;
pub use multipolygon::*;
pub use overlay::*;
pub use select::*;
pub use svg::*;
pub use union::*;
pub use unwrap::*;
