//! HTTP client for the Warden identity endpoint.
//!
//! This crate provides the concrete remote source for the session cache: a
//! typed client for the server's `current-session` contract.
//!
//! # Example
//!
//! ```no_run
//! use warden_client::{IdentityClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = IdentityClient::builder()
//!     .base_url("http://localhost:8080")
//!     .auth_token("secret")
//!     .build()?;
//!
//! match client.session().current().await? {
//!     Some(record) => println!("signed in as {} ({})", record.name, record.role),
//!     None => println!("no session"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client implements
//! [`SessionSource`](warden_types::SessionSource), so it plugs directly
//! into `warden_session::SessionCache`.

pub mod api;
pub mod client;
pub mod error;
mod source;

pub use client::{ClientBuilder, IdentityClient};
pub use error::{Error, Result};
pub use warden_types::SessionRecord;
