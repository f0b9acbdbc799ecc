use crate::{Generator, GeneratorError};
use std::sync::atomic::{AtomicU64, Ordering};
use warren_core::ShortCode;

/// Minimum width of the counter part; shorter counts are zero-padded.
const COUNTER_WIDTH: usize = 6;

/// Deterministic generator handing out `<prefix><counter>` codes.
///
/// Produces `wh000000`, `wh000001`, ... for the prefix `wh`. Handy when a
/// test or demo needs to know the next code. Several instances writing to
/// one store should use distinct prefixes; the shortener still retries when
/// a code is taken.
#[derive(Debug)]
pub struct SeqGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SeqGenerator {
    /// Starts counting from zero under `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, GeneratorError> {
        Self::with_offset(prefix, 0)
    }

    /// Starts counting from `offset` under `prefix`.
    ///
    /// Fails unless every code the counter can reach, up to `u64::MAX`, is a
    /// valid [`ShortCode`].
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self, GeneratorError> {
        let prefix = prefix.into();
        for sample in [0, u64::MAX] {
            if let Err(source) = ShortCode::new(format_code(&prefix, sample)) {
                return Err(GeneratorError::InvalidPrefix { prefix, source });
            }
        }

        Ok(Self {
            prefix,
            next: AtomicU64::new(offset),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

fn format_code(prefix: &str, count: u64) -> String {
    format!("{prefix}{count:0width$}", width = COUNTER_WIDTH)
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortCode {
        let count = self.next.fetch_add(1, Ordering::Relaxed);
        // the prefix was checked against both ends of the counter range
        ShortCode::new_unchecked(format_code(&self.prefix, count))
    }
}
