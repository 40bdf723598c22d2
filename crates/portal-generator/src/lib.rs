//! Short code generation for the Portal URL shortener.

pub mod random;
pub mod seq;

use portal_core::ShortCode;

pub use random::RandomGenerator;
pub use seq::SequentialGenerator;

/// Trait for generating short codes.
///
/// Implementations are pure draws that don't interact with storage.
/// Uniqueness is not a generator concern: the shortener retries generation
/// when the store reports a conflict, up to a configured cap.
pub trait Generator: Send + Sync + 'static {
    /// Draws a candidate short code.
    fn generate(&self) -> ShortCode;
}
