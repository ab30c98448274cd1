//! Error types for geodetic tree operations.

use thiserror::Error;

/// Errors that can occur while constructing geodetic inputs.
///
/// The tree builders and the query engine themselves have no fatal error
/// path: degenerate geometry collapses to trivial trees and empty geometry
/// yields no tree at all. Errors are confined to the input-validation
/// surface (coordinate ranges, spheroid axes).
#[derive(Debug, Error)]
pub enum GeodesyError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid spheroid: {0}")]
    InvalidSpheroid(String),
}

/// Result type for geodetic operations
pub type GeodesyResult<T> = Result<T, GeodesyError>;
