use crate::error::CodecError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL record.
///
/// The short code is the storage key and is not repeated inside the record.
/// On the wire the record is a JSON object with `originalUrl` and
/// `expirationTime` (epoch seconds), which matches the objects written by
/// earlier deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// Absolute deadline in seconds since the Unix epoch.
    pub expiration_time: i64,
}

impl UrlRecord {
    pub fn new(original_url: impl Into<String>, expiration_time: i64) -> Self {
        Self {
            original_url: original_url.into(),
            expiration_time,
        }
    }

    /// Returns `true` once `now` is strictly past the deadline.
    ///
    /// A record whose deadline equals the current second is still live.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_second() > self.expiration_time
    }

    /// Serializes the record into the bytes handed to a record store.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(self).map_err(CodecError::Encode)
    }

    /// Parses a record previously produced by [`UrlRecord::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::Decode)
    }
}
