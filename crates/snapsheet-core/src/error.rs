//! Configuration errors surfaced while validating sheet options.

use thiserror::Error;

/// Raised when sheet configuration cannot be resolved into usable geometry.
///
/// All of these are caught eagerly, at parse or construction time. Letting
/// them through would poison the closest-index search with NaN or produce
/// infinite bounds from an empty reduction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A snap point string did not start with a numeric literal.
    #[error("malformed snap point value: {0:?}")]
    MalformedSnapPoint(String),

    /// The snap point list was empty; at least one point is required.
    #[error("snap point list must not be empty")]
    EmptySnapPoints,

    /// A snap point carried or resolved to a NaN or infinite height.
    #[error("snap point {index} has a non-finite height ({value})")]
    NonFiniteSnapPoint { index: usize, value: f32 },

    /// The configured initial snap index does not address any snap point.
    #[error("initial snap point index {index} is out of range for {len} snap points")]
    InitialIndexOutOfRange { index: usize, len: usize },
}
