//! Core types and traits for the Warren URL shortener.
//!
//! This crate provides the types shared by the shortener and redirector
//! services: the short code, the persisted record and its wire codec, the
//! key-value store contract, and the clock abstraction used for expiration.

pub mod clock;
pub mod error;
pub mod record;
pub mod shortcode;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CodecError, CoreError, StoreError};
pub use record::UrlRecord;
pub use shortcode::ShortCode;
pub use store::RecordStore;
