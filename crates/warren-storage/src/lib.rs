//! Record store backends.
//!
//! Every backend implements [`warren_core::RecordStore`] and keeps the
//! "no such key" case (`StoreError::NotFound`) separate from I/O failures.

pub mod fs;
pub mod memory;
pub mod redis;
pub mod timeout;

pub use fs::FileSystemStore;
pub use memory::InMemoryStore;
pub use redis::RedisStore;
pub use timeout::TimeoutStore;
pub use warren_core::{RecordStore, StoreError};
