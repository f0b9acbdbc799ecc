use crate::error::{Result, ShortenerError};
use crate::lifetime::Lifetime;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;
use warren_core::{Clock, RecordStore, ShortCode, StoreError, SystemClock, UrlRecord};
use warren_generator::Generator;

/// How many codes are tried before giving up on a single `shorten` call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `original_url` under a newly allocated short code and returns
    /// the code. The record expires `lifetime` after the current time.
    async fn shorten(&self, original_url: &str, lifetime: Lifetime) -> Result<ShortCode>;
}

/// Tuning knobs for [`ShortenerService`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Total number of codes tried per call, including the first one.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the [`Shortener`] trait.
///
/// This service wraps a [`RecordStore`] and a [`Generator`]. Codes are
/// claimed with a create-only `insert`; when the store reports the code as
/// taken, a fresh code is generated, up to `max_attempts` in total.
#[derive(Clone)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
    settings: ShortenerSettings,
}

impl<S: RecordStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` on the system clock with default settings.
    pub fn new(store: S, generator: G) -> Self {
        Self::with_settings(store, generator, ShortenerSettings::default())
    }

    pub fn with_settings(store: S, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            clock: Arc::new(SystemClock),
            settings,
        }
    }

    /// Replaces the clock used to compute expiration deadlines.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Convenience entry point taking the raw hour count.
    ///
    /// Negative values fail with [`ShortenerError::InvalidArgument`].
    pub async fn shorten_hours(&self, original_url: &str, hours: i64) -> Result<ShortCode> {
        let lifetime = Lifetime::from_hours(hours)?;
        Shortener::shorten(self, original_url, lifetime).await
    }

    fn validate_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(ShortenerError::InvalidArgument(
                "original url cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn max_attempts(&self) -> u32 {
        self.settings.max_attempts.max(1)
    }
}

#[async_trait]
impl<S: RecordStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, original_url: &str, lifetime: Lifetime) -> Result<ShortCode> {
        Self::validate_url(original_url)?;

        let now = self.clock.now();
        let expiration_time = now
            .as_second()
            .checked_add(lifetime.as_seconds())
            .ok_or_else(|| {
                ShortenerError::InvalidArgument(format!(
                    "expiration time of {lifetime} overflows the clock"
                ))
            })?;

        let payload = UrlRecord::new(original_url, expiration_time).encode()?;

        let attempts = self.max_attempts();
        for attempt in 1..=attempts {
            let code = self.generator.generate();
            match self.store.insert(&code, payload.clone()).await {
                Ok(()) => {
                    info!(
                        code = %code,
                        expiration_time,
                        attempt,
                        "created short url"
                    );
                    return Ok(code);
                }
                Err(StoreError::Conflict(_)) => {
                    warn!(code = %code, attempt, "short code already taken, retrying");
                }
                Err(e) => {
                    warn!(code = %code, error = %e, "failed to store url record");
                    return Err(ShortenerError::StorageWriteFailed(e));
                }
            }
        }

        debug!(attempts, "gave up allocating a short code");
        Err(ShortenerError::CodeAllocationFailed { attempts })
    }
}
