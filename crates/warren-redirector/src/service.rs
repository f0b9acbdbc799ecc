use std::sync::Arc;

use crate::error::RedirectorError;
use crate::outcome::ResolveOutcome;
use crate::redirector::Redirector;
use async_trait::async_trait;
use tracing::{debug, trace, warn};
use warren_core::{Clock, RecordStore, ShortCode, StoreError, SystemClock, UrlRecord};

/// Extracts the short code from a raw request path.
///
/// Leading and trailing `/` separators are stripped. Returns `None` when
/// nothing is left or the remainder is not a valid short code (for example
/// `a/b`).
pub fn normalize_code(raw_path: &str) -> Option<ShortCode> {
    let trimmed = raw_path.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    ShortCode::new(trimmed).ok()
}

/// Service for handling URL redirects.
///
/// Reads the record from the store and evaluates expiration lazily against
/// its clock. Nothing is retried; every outcome is terminal.
#[derive(Clone)]
pub struct RedirectorService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: RecordStore> RedirectorService<S> {
    /// Creates a new RedirectorService with the given store on the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: S, clock: impl Clock) -> Self {
        Self {
            store: Arc::new(store),
            clock: Arc::new(clock),
        }
    }

    /// Resolves a raw request path to its outcome.
    ///
    /// # Returns
    ///
    /// * `Ok(ResolveOutcome::Redirect { url })` - The record is live
    /// * `Ok(ResolveOutcome::Expired)` - The current second is past the deadline
    /// * `Ok(ResolveOutcome::NotFound)` - No record under this code
    /// * `Ok(ResolveOutcome::InvalidCode)` - The path holds no usable code
    /// * `Err(RedirectorError::StorageReadFailed)` - The store could not answer
    /// * `Err(RedirectorError::StorageCorrupted)` - The record could not be decoded
    pub async fn resolve(&self, raw_path: &str) -> crate::Result<ResolveOutcome> {
        Redirector::resolve(self, raw_path).await
    }
}

#[async_trait]
impl<S: RecordStore> Redirector for RedirectorService<S> {
    async fn resolve(&self, raw_path: &str) -> crate::Result<ResolveOutcome> {
        let Some(code) = normalize_code(raw_path) else {
            debug!(path = raw_path, "request path holds no valid short code");
            return Ok(ResolveOutcome::InvalidCode);
        };

        trace!(code = %code, "resolving short code");

        let payload = match self.store.get(&code).await {
            Ok(payload) => payload,
            Err(StoreError::NotFound) => {
                trace!(code = %code, "short code not found");
                return Ok(ResolveOutcome::NotFound);
            }
            Err(e) => {
                warn!(code = %code, error = %e, "failed to read url record");
                return Err(RedirectorError::StorageReadFailed(e));
            }
        };

        let record = UrlRecord::decode(&payload).map_err(|e| {
            warn!(code = %code, error = %e, "stored url record is corrupted");
            RedirectorError::StorageCorrupted(format!("record for '{code}': {e}"))
        })?;

        let now = self.clock.now();
        if record.is_expired_at(now) {
            debug!(
                code = %code,
                expiration_time = record.expiration_time,
                now = now.as_second(),
                "record has expired"
            );
            return Ok(ResolveOutcome::Expired);
        }

        debug!(code = %code, url = %record.original_url, "resolved short code");
        Ok(ResolveOutcome::Redirect {
            url: record.original_url,
        })
    }
}
