//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoTypesError {
    /// A ring has too few points or its first and last points differ.
    #[error("invalid ring: {0}")]
    InvalidRing(String),
    /// A line string has fewer than two points.
    #[error("invalid line string: {0}")]
    InvalidLineString(String),
    /// Geometry of the given type cannot be represented by the model.
    #[error("unsupported geometry type: {0}")]
    Unsupported(String),
}
