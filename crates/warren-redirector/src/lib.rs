//! Redirector service library.
//!
//! This crate provides a [`RedirectorService`] that turns a raw request path
//! into a [`ResolveOutcome`]: a redirect target, an expired link, an unknown
//! code, or an unusable path. Store failures and corrupted records are
//! reported as [`RedirectorError`] instead of being folded into "not found".
//!
//! # Example
//!
//! ```rust
//! use warren_redirector::{RedirectorService, ResolveOutcome};
//! use warren_storage::InMemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedirectorService::new(InMemoryStore::new());
//!
//! match service.resolve("/abc123").await? {
//!     ResolveOutcome::Redirect { url } => println!("Redirect to: {url}"),
//!     other => println!("No redirect: {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod outcome;
pub mod redirector;
pub mod service;

pub use error::{RedirectorError, Result};
pub use outcome::ResolveOutcome;
pub use redirector::Redirector;
pub use service::{normalize_code, RedirectorService};
