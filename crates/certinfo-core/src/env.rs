//! Environment abstraction for randomness.
//!
//! Batch identifiers must be unpredictable in production and reproducible in
//! tests, so the encoder never reaches for an RNG directly. Production uses
//! [`SystemEnv`] (OS entropy); the harness supplies seeded implementations.

use crate::error::EntropyError;

/// Source of random bytes.
pub trait Environment {
    /// Fill `buffer` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the entropy source is unavailable. Implementations
    /// must not fall back to a fixed pattern.
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), EntropyError>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        (**self).random_bytes(buffer)
    }
}

/// Operating system entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(buffer).map_err(|e| EntropyError(e.to_string()))
    }
}
