//! Error types for the conciergerie backend.

use thiserror::Error;

/// Errors that can occur in conciergerie operations.
///
/// The HTTP layer maps variants to status codes, so callers can tell a
/// missing task apart from a storage or network failure without string
/// matching.
#[derive(Error, Debug)]
pub enum ConciergeError {
    #[error("x-client-id header is required")]
    MissingTenantHeader,

    #[error("Invalid client id: {0:?}")]
    InvalidTenantId(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Sync error: {0}")]
    Sync(String),
}

/// Result type alias for conciergerie operations.
pub type ConciergeResult<T> = Result<T, ConciergeError>;
