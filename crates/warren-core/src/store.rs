use crate::error::{StoreError, StoreResult};
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A key-value store holding encoded URL records.
///
/// The store only moves bytes; encoding is the caller's job (see
/// [`UrlRecord::encode`][crate::UrlRecord::encode]). How a short code maps to a
/// physical key (prefix, file extension) is up to the backend.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Fetches the value stored under `code`.
    ///
    /// Returns `Err(StoreError::NotFound)` if the key does not exist. Any
    /// other error means the backend could not answer.
    async fn get(&self, code: &ShortCode) -> StoreResult<Vec<u8>>;

    /// Stores `value` under `code`, replacing any previous value.
    async fn put(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()>;

    /// Stores `value` under `code` only if the key is free.
    ///
    /// Returns `Err(StoreError::Conflict)` when the key already exists. The
    /// default implementation checks with [`get`](RecordStore::get) first and
    /// is therefore best-effort; backends with an atomic create should
    /// override it.
    async fn insert(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        match self.get(code).await {
            Ok(_) => Err(StoreError::Conflict(code.to_string())),
            Err(StoreError::NotFound) => self.put(code, value).await,
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    async fn get(&self, code: &ShortCode) -> StoreResult<Vec<u8>> {
        (**self).get(code).await
    }

    async fn put(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        (**self).put(code, value).await
    }

    async fn insert(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        (**self).insert(code, value).await
    }
}
