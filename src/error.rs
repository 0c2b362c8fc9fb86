//! Error types for the relate engine.

use thiserror::Error;

/// Relate engine errors.
#[derive(Error, Debug)]
pub enum RelateError {
    /// Malformed DE-9IM pattern (wrong length or disallowed character).
    #[error("invalid DE-9IM pattern: {0}")]
    InvalidPattern(String),

    /// A coordinate contained NaN or an infinity.
    #[error("non-finite coordinate: ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// Geometry structurally unusable for topology evaluation.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for relate operations.
pub type Result<T> = std::result::Result<T, RelateError>;
