use thiserror::Error;

/// Sensor fusion error types.
///
/// Only the filter-facing helpers can fail at run time; the composite
/// measurement vectors themselves reject every misuse class at compile time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("sigma point spread must be positive, got alpha = {alpha}")]
    InvalidSigmaSpread { alpha: f64 },

    #[error("degenerate sigma scaling: n + lambda is numerically zero")]
    DegenerateScaling,

    #[error("expected {expected} sigma points, got {actual}")]
    SigmaCountMismatch { expected: usize, actual: usize },
}

/// Result type for fusion operations
pub type FusionResult<T> = Result<T, FusionError>;
