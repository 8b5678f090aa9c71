//! The authenticated user's profile as known to the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's identity and authorization data.
///
/// This is the value the remote session endpoint returns for an
/// authenticated caller. An unauthenticated session is represented as the
/// absence of a record (`None`), never as an empty record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique user identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address, if the server exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Primary role used for authorization decisions.
    pub role: String,

    /// Fine-grained permission grants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    /// When the server issued this view of the session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Create a record with the required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role: role.into(),
            permissions: Vec::new(),
            issued_at: None,
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the permission grants.
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Set the issue timestamp.
    pub fn with_issued_at(mut self, ts: DateTime<Utc>) -> Self {
        self.issued_at = Some(ts);
        self
    }

    /// Check whether the record carries a specific permission grant.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Check whether the record holds the given role.
    pub fn is_role(&self, role: &str) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_lookup() {
        let record = SessionRecord::new("u-1", "Alex", "member")
            .with_permissions(vec!["boards:read".to_string(), "boards:write".to_string()]);

        assert!(record.has_permission("boards:write"));
        assert!(!record.has_permission("admin:invite"));
        assert!(record.is_role("member"));
        assert!(!record.is_role("admin"));
    }

    #[test]
    fn test_deserializes_minimal_body() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"id":"u-1","name":"Alex","role":"member"}"#).unwrap();

        assert_eq!(record.id, "u-1");
        assert_eq!(record.role, "member");
        assert!(record.email.is_none());
        assert!(record.permissions.is_empty());
        assert!(record.issued_at.is_none());
    }
}
