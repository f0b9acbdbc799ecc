//! Short code generators.
//!
//! Generators are pure: they never look at storage. Uniqueness against
//! existing records is enforced by the shortener, which retries on conflict.

pub mod random;
pub mod seq;

pub use random::{GeneratorError, RandomGenerator};
pub use seq::SeqGenerator;

use warren_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations can vary from random generators to deterministic
/// counters. `generate` is infallible; anything that can fail (seeding,
/// configuration) must fail when the generator is constructed.
pub trait Generator: Send + Sync + 'static {
    /// Generates a new short code.
    fn generate(&self) -> ShortCode;
}

impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    fn generate(&self) -> ShortCode {
        (**self).generate()
    }
}
