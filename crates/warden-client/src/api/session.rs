//! Current-session API.

use warden_types::SessionRecord;

use crate::client::IdentityClient;
use crate::error::Result;

/// Session API client.
pub struct SessionApi {
    client: IdentityClient,
}

impl SessionApi {
    pub(crate) fn new(client: IdentityClient) -> Self {
        Self { client }
    }

    /// Fetch the current authenticated session.
    ///
    /// Returns `Ok(None)` when the server explicitly reports that no
    /// session exists (401); any other failure surfaces as an error.
    pub async fn current(&self) -> Result<Option<SessionRecord>> {
        match self.client.get::<SessionRecord>("session/current").await {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.is_auth_error() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
