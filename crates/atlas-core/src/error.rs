// crates/atlas-core/src/error.rs
use thiserror::Error;

/// Errors raised while talking to a [`CountrySource`](crate::source::CountrySource)
/// or reading a dataset dump.
///
/// Store operations never fail; only fetches and lookups return this type.
#[derive(Debug, Error)]
pub enum AtlasError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AtlasError {
    /// True for a non-success status of 404, which the lookup pages treat as
    /// "nothing matched" rather than a transport problem.
    pub fn is_not_found(&self) -> bool {
        match self {
            AtlasError::NotFound(_) => true,
            AtlasError::Status { status, .. } => *status == 404,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
