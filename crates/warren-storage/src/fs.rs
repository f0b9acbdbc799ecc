use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};
use warren_core::error::StoreResult;
use warren_core::{RecordStore, ShortCode, StoreError};

const OBJECT_EXTENSION: &str = "json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A [`RecordStore`] keeping one object file per short code.
///
/// The code `abc123` is stored at `<root>/abc123.json`, the same key layout
/// used by the object-storage buckets of earlier deployments. Writes go to a
/// temporary file first so readers never observe a half-written object.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

fn map_io_error(operation: &str, err: std::io::Error) -> StoreError {
    let message = format!("{operation}: {err}");
    match err.kind() {
        ErrorKind::NotFound => StoreError::NotFound,
        ErrorKind::AlreadyExists => StoreError::Conflict(message),
        ErrorKind::TimedOut => StoreError::Timeout(message),
        ErrorKind::PermissionDenied | ErrorKind::InvalidInput => StoreError::Operation(message),
        _ => StoreError::Unavailable(message),
    }
}

impl FileSystemStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            StoreError::Unavailable(format!(
                "failed to create store directory '{}': {e}",
                root.display()
            ))
        })?;
        debug!(root = %root.display(), "opened filesystem record store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the object holding `code`.
    pub fn object_path(&self, code: &ShortCode) -> PathBuf {
        self.root.join(format!("{}.{}", code.as_str(), OBJECT_EXTENSION))
    }

    fn temp_path(&self, code: &ShortCode) -> PathBuf {
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.root.join(format!(
            ".{}.{}.{}.tmp",
            code.as_str(),
            std::process::id(),
            seq
        ))
    }

    async fn write_temp(&self, code: &ShortCode, value: &[u8]) -> StoreResult<PathBuf> {
        let temp = self.temp_path(code);
        tokio::fs::write(&temp, value)
            .await
            .map_err(|e| match map_io_error("failed to write object", e) {
                // the root vanished underneath us; that is not a missing key
                StoreError::NotFound => StoreError::Unavailable(format!(
                    "store directory '{}' is missing",
                    self.root.display()
                )),
                other => other,
            })?;
        Ok(temp)
    }

    /// Confirms the root is still a directory, so a missing object can be
    /// told apart from a missing or unmounted store.
    async fn ensure_root(&self) -> StoreResult<()> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::Unavailable(format!(
                "store root '{}' is not a directory",
                self.root.display()
            ))),
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "store root is not reachable");
                Err(StoreError::Unavailable(format!(
                    "store directory '{}' is missing: {e}",
                    self.root.display()
                )))
            }
        }
    }

    async fn discard(temp: &Path) {
        if let Err(e) = tokio::fs::remove_file(temp).await {
            warn!(path = %temp.display(), error = %e, "failed to remove temporary object");
        }
    }
}

#[async_trait]
impl RecordStore for FileSystemStore {
    async fn get(&self, code: &ShortCode) -> StoreResult<Vec<u8>> {
        let path = self.object_path(code);
        trace!(code = %code, path = %path.display(), "reading object");

        match tokio::fs::read(&path).await {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.ensure_root().await?;
                Err(StoreError::NotFound)
            }
            Err(e) => Err(map_io_error("failed to read object", e)),
        }
    }

    async fn put(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        let path = self.object_path(code);
        trace!(code = %code, path = %path.display(), "writing object");

        let temp = self.write_temp(code, &value).await?;
        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            Self::discard(&temp).await;
            return Err(map_io_error("failed to publish object", e));
        }
        Ok(())
    }

    async fn insert(&self, code: &ShortCode, value: Vec<u8>) -> StoreResult<()> {
        let path = self.object_path(code);
        trace!(code = %code, path = %path.display(), "creating object");

        let temp = self.write_temp(code, &value).await?;
        // hard_link refuses to replace an existing file, which makes the
        // create atomic with respect to other writers.
        let linked = tokio::fs::hard_link(&temp, &path).await;
        Self::discard(&temp).await;

        linked.map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StoreError::Conflict(code.to_string()),
            _ => map_io_error("failed to publish object", e),
        })
    }
}
