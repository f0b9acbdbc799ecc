use crate::Generator;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use warren_core::ShortCode;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest code the random generator will produce.
pub const MIN_CODE_LENGTH: usize = 8;
/// Longest code the random generator will produce.
pub const MAX_CODE_LENGTH: usize = 64;
/// 12 base62 characters give roughly 71 bits of entropy.
pub const DEFAULT_CODE_LENGTH: usize = 12;

/// Errors returned while constructing a generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("code length {length} is outside {min}..={max}")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
    #[error("failed to seed random source from the operating system: {0}")]
    Seed(String),
    #[error("prefix '{prefix}' cannot start a short code: {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: warren_core::CoreError,
    },
}

/// Generates fixed-length base62 codes from an OS-seeded RNG.
#[derive(Debug)]
pub struct RandomGenerator {
    rng: Mutex<StdRng>,
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// Seeds from the operating system once; a failing entropy source is
    /// reported here rather than on every call to `generate`.
    pub fn new(length: usize) -> Result<Self, GeneratorError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(GeneratorError::InvalidLength {
                length,
                min: MIN_CODE_LENGTH,
                max: MAX_CODE_LENGTH,
            });
        }

        let rng = StdRng::try_from_os_rng().map_err(|e| GeneratorError::Seed(e.to_string()))?;
        Ok(Self::with_rng(rng, length))
    }

    /// Creates a generator with the default code length.
    pub fn with_default_length() -> Result<Self, GeneratorError> {
        Self::new(DEFAULT_CODE_LENGTH)
    }

    fn with_rng(rng: StdRng, length: usize) -> Self {
        Self {
            rng: Mutex::new(rng),
            length,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = self.rng.lock();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
