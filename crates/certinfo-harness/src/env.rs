//! Environments with controlled randomness.

use std::sync::{Arc, Mutex};

use certinfo_core::{EntropyError, Environment};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reproducible randomness from a seed.
///
/// Clones share one RNG stream.
#[derive(Debug, Clone)]
pub struct SeededEnv {
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SeededEnv {
    /// Create an environment seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))) }
    }
}

impl Environment for SeededEnv {
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        let mut rng = self.rng.lock().map_err(|_| EntropyError("seeded rng poisoned".into()))?;
        rng.fill_bytes(buffer);
        Ok(())
    }
}

/// Entropy source that is always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingEnv;

impl Environment for FailingEnv {
    fn random_bytes(&self, _buffer: &mut [u8]) -> Result<(), EntropyError> {
        Err(EntropyError("no entropy device".into()))
    }
}

/// Degenerate source that fills every buffer with the same byte.
#[derive(Debug, Clone, Copy)]
pub struct RepeatingEnv(pub u8);

impl Environment for RepeatingEnv {
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        buffer.fill(self.0);
        Ok(())
    }
}
