//! Session source implementation backed by the HTTP client.

use async_trait::async_trait;

use warden_types::{SessionRecord, SessionSource, SourceError};

use crate::client::IdentityClient;

#[async_trait]
impl SessionSource for IdentityClient {
    /// Fetch the current session over HTTP.
    ///
    /// An explicit 401 from the server is the unauthenticated state and
    /// maps to `Ok(None)`; transport and server failures map to the
    /// transient fetch error.
    async fn fetch_current(&self) -> std::result::Result<Option<SessionRecord>, SourceError> {
        self.session()
            .current()
            .await
            .map_err(|err| SourceError::with_cause("remote session fetch failed", err))
    }
}
