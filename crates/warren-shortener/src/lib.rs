//! URL shortener service implementation.
//!
//! This crate turns an original URL and a requested lifetime into a stored
//! record under a freshly allocated short code. Core types are re-exported
//! from `warren_core`.

pub mod error;
pub mod lifetime;
pub mod service;

pub use error::ShortenerError;
pub use lifetime::Lifetime;
pub use service::{Shortener, ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
