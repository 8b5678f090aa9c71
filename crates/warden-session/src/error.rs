//! Error types for session cache operations.

use std::sync::Arc;

use warden_types::SourceError;

/// Error type for session cache operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote fetch behind a forced synchronization failed.
    #[error("{0}")]
    Fetch(Arc<SourceError>),

    /// The fetch behind a forced synchronization was torn down before it
    /// could commit.
    #[error("synchronization interrupted before completion")]
    Interrupted,
}

/// Result type for session cache operations.
pub type Result<T> = std::result::Result<T, Error>;
