/// Crate-wide result alias.
pub type HydroResult<T> = Result<T, HydroError>;

/// Error taxonomy for the interpolation and rendering pipeline.
///
/// Per-timestamp and per-step failures are carried alongside successful results by the
/// batch types; only a total absence of renderable geometry or samples surfaces as a
/// top-level error.
#[derive(thiserror::Error, Debug)]
pub enum HydroError {
    /// Invalid configuration or API misuse.
    #[error("validation error: {0}")]
    Validation(String),

    /// A sample row with a missing or non-numeric coordinate or value.
    #[error("malformed sample: {0}")]
    MalformedSample(String),

    /// Zero usable samples for a timestamp.
    #[error("no usable station samples")]
    InsufficientStations,

    /// The global minimum equals the global maximum; normalization is undefined.
    #[error("degenerate value range: global min equals global max ({value})")]
    DegenerateRange {
        /// The value shared by the whole batch.
        value: f64,
    },

    /// Unclosed, zero-area or otherwise degenerate boundary geometry.
    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    /// No grid cell falls inside the boundary; nothing is renderable.
    #[error("no grid cell falls inside the boundary")]
    OutOfBoundsGrid,

    /// A synthetic animation step has no station present at both endpoints.
    #[error("no station present at both endpoints for synthetic step {step}")]
    MissingStations {
        /// Index of the affected step in the animation sequence.
        step: usize,
    },

    /// Raster encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// The operation was cancelled before completion.
    #[error("operation cancelled")]
    Cancelled,

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HydroError {
    /// Build a [`HydroError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HydroError::MalformedSample`].
    pub fn malformed_sample(msg: impl Into<String>) -> Self {
        Self::MalformedSample(msg.into())
    }

    /// Build a [`HydroError::InvalidBoundary`].
    pub fn invalid_boundary(msg: impl Into<String>) -> Self {
        Self::InvalidBoundary(msg.into())
    }

    /// Build a [`HydroError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
