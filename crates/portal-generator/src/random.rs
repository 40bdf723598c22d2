use crate::Generator;
use portal_core::ShortCode;
use rand::Rng;

/// The URL-safe alphabet candidate codes are drawn from.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// The smallest code length a deployment should configure.
pub const MIN_CODE_LENGTH: usize = 6;

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Draws fixed-length codes uniformly from [`ALPHABET`].
///
/// Candidate collisions are possible (and expected under enough volume);
/// the shortener's bounded retry loop handles them. Callers are expected to
/// configure at least [`MIN_CODE_LENGTH`] characters.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of the given length.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Returns the configured code length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
