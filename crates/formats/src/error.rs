#[derive(Debug)]
pub enum FormatError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
    NotATopology,
    Topology(String),
    MissingObject(String),
    InvalidIsoTable(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Json(err) => write!(f, "JSON parse error: {err}"),
            FormatError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FormatError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
            FormatError::NotATopology => write!(f, "expected TopoJSON Topology"),
            FormatError::Topology(msg) => write!(f, "TopoJSON conversion failed: {msg}"),
            FormatError::MissingObject(name) => {
                write!(f, "topology has no object named {name:?}")
            }
            FormatError::InvalidIsoTable(msg) => write!(f, "invalid ISO table: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Json(err) => Some(err),
            _ => None,
        }
    }
}
