//! Single-entry session cache with forced synchronization.
//!
//! This crate keeps a client's view of the authenticated user consistent
//! with server truth:
//! - lazy fetch through a [`SessionSource`] on first read
//! - staleness policy (time-to-live, always-stale, or never-stale)
//! - forced synchronization when server state changed out of band
//! - single-flight de-duplication of concurrent fetches
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use warden_session::{CacheConfig, SessionCache, StalenessPolicy};
//!
//! let config = CacheConfig::new().with_ttl(Duration::from_secs(60));
//! let cache = SessionCache::new(config, source);
//!
//! let status = cache.read().await;
//! if status.is_authenticated() {
//!     // ...
//! }
//!
//! // A role was changed elsewhere; re-establish server truth before
//! // making another authorization decision.
//! let status = cache.sync().await?;
//! ```

mod cache;
mod config;
mod error;
mod policy;
mod status;

pub use cache::{SessionCache, SyncStats};
pub use config::CacheConfig;
pub use error::{Error, Result};
pub use policy::StalenessPolicy;
pub use status::SessionStatus;
pub use warden_types::{SessionRecord, SessionSource, SharedSessionSource, SourceError};
