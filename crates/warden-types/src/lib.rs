//! Shared identity types for the Warden session cache.

pub mod record;
pub mod source;

pub use record::SessionRecord;
pub use source::{SessionSource, SharedSessionSource, SourceError};
