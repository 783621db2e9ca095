//! Error kinds shared by the store, projection and rendering layers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacenamesError>;

#[derive(Error, Debug)]
pub enum PlacenamesError {
    /// A query could not be executed (connection refused, bad SQL, ...)
    #[error("data store unavailable: {0}")]
    DataStoreUnavailable(String),

    /// No row or static entry exists for the identifier
    #[error("no resource with identifier '{0}'")]
    NotFound(String),

    /// A static lookup table has no entry for a value found in the data
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An RDF graph could not be built or serialized
    #[error("failed to serialize {format}: {message}")]
    Serialization {
        format: &'static str,
        message: String,
    },

    /// Request parameters out of range
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl PlacenamesError {
    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        PlacenamesError::DataStoreUnavailable(cause.to_string())
    }

    pub fn serialization(format: &'static str, cause: impl std::fmt::Display) -> Self {
        PlacenamesError::Serialization {
            format,
            message: cause.to_string(),
        }
    }
}

impl From<tokio_postgres::Error> for PlacenamesError {
    fn from(e: tokio_postgres::Error) -> Self {
        PlacenamesError::DataStoreUnavailable(e.to_string())
    }
}
