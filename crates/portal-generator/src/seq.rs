use crate::Generator;
use portal_core::ShortCode;

/// A deterministic short code generator using a sequential counter.
///
/// Produces codes like "pt000000", "pt000001", etc. Collision-free within a
/// single instance, which makes it the generator of choice in tests and
/// single-node setups where predictable codes are useful.
#[derive(Debug)]
pub struct SequentialGenerator {
    counter: std::sync::atomic::AtomicU64,
    prefix: String,
}

impl Clone for SequentialGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(
                self.counter.load(std::sync::atomic::Ordering::SeqCst),
            ),
            prefix: self.prefix.clone(),
        }
    }
}

impl SequentialGenerator {
    /// Creates a new sequential generator with the given prefix.
    ///
    /// The prefix must stick to the short-code alphabet (ASCII letters and
    /// digits) for the output to pass validation downstream.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
            prefix: prefix.into(),
        }
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SequentialGenerator {
    fn generate(&self) -> ShortCode {
        let count = self
            .counter
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
