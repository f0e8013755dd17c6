//! Error types for loading and querying the atlas.

use std::path::PathBuf;

use thiserror::Error;

/// Library errors.
///
/// "Not found" is never an error: unknown codes and coordinates outside
/// every boundary come back as `None`.
#[derive(Error, Debug)]
pub enum LocusError {
    /// Coordinates that are not finite numbers.
    #[error("Wrong coordinates (lat: {lat}, lng: {lng})")]
    InvalidCoordinates { lat: String, lng: String },

    /// A data file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not valid JSON for its schema.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An admin1 feature whose properties do not fit the typed schema.
    #[error("Invalid admin1 feature #{index}: {reason}")]
    InvalidFeature { index: usize, reason: String },

    /// Two catalog entries share a code that must be unique.
    #[error("Duplicate {kind} code: {code}")]
    DuplicateCode { kind: &'static str, code: String },

    /// Entity kind name that is not one of the catalog kinds.
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),
}

impl LocusError {
    pub(crate) fn invalid_coordinates(lat: impl ToString, lng: impl ToString) -> Self {
        LocusError::InvalidCoordinates {
            lat: lat.to_string(),
            lng: lng.to_string(),
        }
    }
}

/// Result type for atlas operations.
pub type Result<T> = std::result::Result<T, LocusError>;
