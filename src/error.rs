use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the collision engine, configuration layer and diagnostics.
///
/// The per-tick engine path never returns an error to its caller; `DegenerateGeometry`
/// is produced and consumed internally while a tick is being resolved.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user, API or configuration parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A population requested a radius above the configured maximum.
    #[error("radius {radius} exceeds the maximum allowed radius of {limit}")]
    RadiusTooLarge { radius: f64, limit: f64 },

    /// Two particle centers are (nearly) coincident, so no contact normal exists.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A diagnostic was requested over too few samples.
    #[error("insufficient samples: {0}")]
    InsufficientSamples(String),

    /// Malformed configuration document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Propagated I/O errors (configuration files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
