//! Error types for the catalog client.

use thiserror::Error;

/// Main error type for all catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Song was not found in the catalog.
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// Artist was not found in the catalog.
    #[error("Artist not found: {0}")]
    ArtistNotFound(String),

    /// Album was not found in the catalog.
    #[error("Album not found: {0}")]
    AlbumNotFound(String),

    /// Category was not found in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Identifier cannot be used as a path segment.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// The payload did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// Client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CatalogError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::HttpStatus { status, .. } => Some(*status),
            CatalogError::RequestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::SongNotFound(_)
                | CatalogError::ArtistNotFound(_)
                | CatalogError::AlbumNotFound(_)
                | CatalogError::CategoryNotFound(_)
        ) || self.status() == Some(404)
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
