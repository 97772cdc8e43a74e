//! Defines [`GeoSlimError`], representing all errors returned by this crate.

use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
///
/// Only the I/O layer and option validation can fail. Counting, rounding, simplification and
/// analysis of geometries never return an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoSlimError {
    /// Options were out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// [geojson::Error]
    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoSlimError>;
