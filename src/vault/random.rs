//! Random byte sources for salt and nonce generation.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::error::KrakenError;

/// Trait for providing cryptographically secure random bytes.
///
/// The vault draws every salt and every AES-GCM nonce from its source.
/// Implementations must be safe to share between threads.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), KrakenError>;
}

/// The operating system CSPRNG.
///
/// Stateless, so a single value can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), KrakenError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| KrakenError::Entropy(e.to_string()))
    }
}

/// Any mutex-guarded RNG is a source.
///
/// This is how tests inject a seeded `StdRng` for reproducible salts and
/// envelopes. Do not use a seeded generator in production.
impl<R> RandomSource for Mutex<R>
where
    R: RngCore + CryptoRng + Send,
{
    fn fill(&self, dest: &mut [u8]) -> Result<(), KrakenError> {
        let mut rng = self
            .lock()
            .map_err(|_| KrakenError::Entropy("random source lock poisoned".to_string()))?;
        rng.try_fill_bytes(dest)
            .map_err(|e| KrakenError::Entropy(e.to_string()))
    }
}

impl<T: RandomSource + ?Sized> RandomSource for std::sync::Arc<T> {
    fn fill(&self, dest: &mut [u8]) -> Result<(), KrakenError> {
        (**self).fill(dest)
    }
}
