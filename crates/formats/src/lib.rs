pub mod error;
pub mod feature;
pub mod ingest;
pub mod iso;
pub mod topology;

pub use error::*;
pub use feature::*;
pub use ingest::*;
pub use iso::*;
pub use topology::*;
