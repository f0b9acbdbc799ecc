use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;
use warren_core::error::StoreResult;
use warren_core::{RecordStore, ShortCode, StoreError};

/// A [`RecordStore`] decorator that bounds every call with a deadline.
///
/// A call that outlives the deadline fails with [`StoreError::Timeout`]; the
/// services report that as a read or write failure and never retry it.
#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: RecordStore> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Returns a reference to the inner store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        code: &ShortCode,
        call: impl Future<Output = StoreResult<T>> + Send,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    code = %code,
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "store call timed out"
                );
                Err(StoreError::Timeout(format!(
                    "{operation} exceeded {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for TimeoutStore<S> {
    async fn get(&self, code: &ShortCode) -> StoreResult<Vec<u8>> {
        self.bounded("get", code, self.inner.get(code)).await
    }

    async fn put(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        self.bounded("put", code, self.inner.put(code, value)).await
    }

    async fn insert(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        self.bounded("insert", code, self.inner.insert(code, value)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    struct StalledStore;

    #[async_trait]
    impl RecordStore for StalledStore {
        async fn get(&self, _code: &ShortCode) -> StoreResult<Vec<u8>> {
            std::future::pending().await
        }

        async fn put(&self, _code: &ShortCode, _value: Vec<u8>) -> StoreResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_get_times_out() {
        let store = TimeoutStore::new(StalledStore, Duration::from_millis(50));
        let code = ShortCode::new_unchecked("abc123");

        let err = store.get(&code).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_insert_times_out() {
        let store = TimeoutStore::new(StalledStore, Duration::from_millis(50));
        let code = ShortCode::new_unchecked("abc123");

        let err = store.insert(&code, b"v".to_vec()).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }

    #[tokio::test]
    async fn fast_calls_pass_through() {
        let store = TimeoutStore::new(InMemoryStore::new(), Duration::from_secs(1));
        let code = ShortCode::new_unchecked("abc123");

        store.insert(&code, b"v".to_vec()).await.unwrap();
        assert_eq!(store.get(&code).await.unwrap(), b"v".to_vec());
        assert_eq!(
            store.get(&ShortCode::new_unchecked("other")).await,
            Err(StoreError::NotFound)
        );
    }
}
