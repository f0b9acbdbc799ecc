use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, trace, warn};
use warren_core::error::StoreResult;
use warren_core::{RecordStore, ShortCode, StoreError};

const DEFAULT_KEY_PREFIX: &str = "warren:url:";

/// A Redis-backed [`RecordStore`].
///
/// Records are stored as raw bytes under `<prefix><code>`. `insert` uses
/// `SET NX`, so concurrent allocations of the same code cannot both win.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_dropped() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

impl RedisStore {
    /// Creates a new Redis store with the default key prefix.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a new Redis store with a custom key prefix (e.g. "myapp:url:").
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a multiplexed connection to `url` and wraps it.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to redis", e))?;
        debug!("connected to redis record store");
        Ok(Self::new(conn))
    }

    fn key(&self, code: &ShortCode) -> String {
        storage_key(&self.key_prefix, code)
    }
}

fn storage_key(prefix: &str, code: &ShortCode) -> String {
    format!("{}{}", prefix, code.as_str())
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn get(&self, code: &ShortCode) -> StoreResult<Vec<u8>> {
        let key = self.key(code);
        trace!(code = %code, "fetching record from redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<Vec<u8>>>(&key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => {
                trace!(code = %code, "record not present in redis");
                Err(StoreError::NotFound)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "redis error on get");
                Err(map_redis_error("failed to fetch value from redis", e))
            }
        }
    }

    async fn put(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        let key = self.key(code);
        trace!(code = %code, "writing record to redis");

        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, value).await.map_err(|e| {
            warn!(code = %code, error = %e, "redis error on set");
            map_redis_error("failed to write value to redis", e)
        })
    }

    async fn insert(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        let key = self.key(code);
        trace!(code = %code, "creating record in redis");

        let mut conn = self.conn.clone();
        match conn.set_nx::<_, _, bool>(&key, value).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!(code = %code, "redis key already taken");
                Err(StoreError::Conflict(code.to_string()))
            }
            Err(e) => {
                warn!(code = %code, error = %e, "redis error on set nx");
                Err(map_redis_error("failed to create value in redis", e))
            }
        }
    }
}
