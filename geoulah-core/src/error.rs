//! Error types for Geoulah Core

use thiserror::Error;

/// Result type alias using GeoulahError
pub type Result<T> = std::result::Result<T, GeoulahError>;

/// Top-level error type for all Geoulah operations
#[derive(Debug, Error)]
pub enum GeoulahError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a content source while retrieving a resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unexpected status {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Undecodable payload: {0}")]
    Decode(String),
}

/// Failures surfaced by the book data service.
///
/// All three are recoverable by a page controller: each maps to a
/// localized message and a link back to the catalog or book page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Book list fetch failed and nothing was ever cached
    #[error("Book data unavailable: {0}")]
    DataUnavailable(String),

    /// Requested book or chapter has no match
    #[error("Not found: {0}")]
    NotFound(String),

    /// Chapter fragment fetch failed and nothing was ever cached
    #[error("Chapter content unavailable: {0}")]
    ContentUnavailable(String),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Errors in environment or command-line configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid site location: {0}")]
    InvalidSite(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Errors while mapping a request path onto a canonical page route
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}
