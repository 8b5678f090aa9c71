//! Health API.

use crate::client::IdentityClient;
use crate::error::Result;

/// Server health response.
#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    /// Reported status, e.g. `"ok"`.
    pub status: String,
}

/// Health API client.
///
/// Note: the health endpoint does not require authentication.
pub struct HealthApi {
    client: IdentityClient,
}

impl HealthApi {
    pub(crate) fn new(client: IdentityClient) -> Self {
        Self { client }
    }

    /// Check basic health.
    pub async fn check(&self) -> Result<HealthResponse> {
        // Health endpoint is at root, not under /api/v1
        let inner = self.client.inner();
        let url = inner
            .base_url
            .join("health")
            .map_err(crate::error::Error::from)?;

        let response: reqwest::Response = inner.http.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(crate::error::Error::Api {
                status: response.status().as_u16(),
                code: "health_check_failed".to_string(),
                message: "Health check failed".to_string(),
            })
        }
    }

    /// Simple connectivity check - returns true if server is reachable.
    pub async fn is_reachable(&self) -> bool {
        self.check().await.is_ok()
    }
}
