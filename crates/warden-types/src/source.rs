//! Remote source seam for session fetches.
//!
//! The session cache is decoupled from where server truth lives through the
//! [`SessionSource`] trait. The HTTP client implements it for production
//! use; tests implement it with canned responses.

use std::sync::Arc;

use async_trait::async_trait;

use crate::record::SessionRecord;

/// Failure of a remote session fetch.
///
/// Covers transport and server failures only. An explicitly unauthenticated
/// session is not an error; sources report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
#[error("session fetch failed: {message}")]
pub struct SourceError {
    message: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create an error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create an error wrapping an underlying cause.
    pub fn with_cause(
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Trait for remote sources of the current session.
///
/// The cache calls [`fetch_current`](SessionSource::fetch_current) on cache
/// misses, staleness, and forced synchronization. The operation must be
/// idempotent; the cache never retries it on failure.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Fetch the current session from the remote source.
    ///
    /// Returns `Ok(None)` when the source explicitly reports that no
    /// session exists.
    async fn fetch_current(&self) -> Result<Option<SessionRecord>, SourceError>;
}

/// Shared reference to a session source.
pub type SharedSessionSource = Arc<dyn SessionSource>;

#[async_trait]
impl<S: SessionSource + ?Sized> SessionSource for Arc<S> {
    async fn fetch_current(&self) -> Result<Option<SessionRecord>, SourceError> {
        (**self).fetch_current().await
    }
}
