use serde::{Deserialize, Serialize};
use serde_json::Value;
use warren_shortener::{Lifetime, ShortenerError};

/// Body of `POST /`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as a client error with a useful message instead of a generic
/// deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub original_url: Option<String>,
    /// Hours, either as a JSON integer or a numeric string.
    pub expiration_time: Option<Value>,
}

impl CreateUrlRequest {
    pub fn original_url(&self) -> Result<&str, ShortenerError> {
        self.original_url
            .as_deref()
            .ok_or_else(|| ShortenerError::InvalidArgument("originalUrl is required".to_string()))
    }

    pub fn lifetime(&self) -> Result<Lifetime, ShortenerError> {
        match &self.expiration_time {
            None | Some(Value::Null) => Err(ShortenerError::InvalidArgument(
                "expirationTime is required".to_string(),
            )),
            Some(Value::Number(number)) => {
                let hours = number.as_i64().ok_or_else(|| {
                    ShortenerError::InvalidArgument(format!(
                        "expirationTime must be a whole number of hours, got {number}"
                    ))
                })?;
                Lifetime::from_hours(hours)
            }
            Some(Value::String(text)) => text.parse(),
            Some(other) => Err(ShortenerError::InvalidArgument(format!(
                "expirationTime must be a number or numeric string, got {other}"
            ))),
        }
    }
}

/// Body returned by `POST /`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub code: String,
    pub short_url: String,
}
