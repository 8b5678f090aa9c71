//! Snapshot of the cached session returned to consumers.

use std::sync::Arc;

use warden_types::{SessionRecord, SourceError};

/// Point-in-time view of the cached session.
///
/// Returned by [`SessionCache::read`](crate::SessionCache::read) and
/// [`SessionCache::sync`](crate::SessionCache::sync). The snapshot does not
/// update in place; read again once `is_loading` clears.
#[derive(Debug, Clone)]
pub struct SessionStatus {
    /// The authenticated user, when a trusted record is present.
    ///
    /// `None` while the entry is invalidated, after a fetch failure outside
    /// the record's validity window, or when the server reported no
    /// session.
    pub user: Option<SessionRecord>,

    /// Whether a fetch is currently in flight.
    pub is_loading: bool,

    /// Failure recorded by the most recent fetch, cleared on the next
    /// successful one.
    pub error: Option<Arc<SourceError>>,
}

impl SessionStatus {
    /// A session exists if and only if a trusted record is present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
