//! Nonce generation for Kraken Futures authentication.
//!
//! Kraken rejects any request whose nonce is not greater than the last nonce
//! it accepted for the same API key. Uniqueness alone is not enough: nonces
//! must increase in the order requests reach the venue.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::KrakenError;

/// Trait for providing nonces for authenticated requests.
///
/// The signer never checks nonces; monotonicity is the provider's job.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value. When no
    /// such value exists the provider returns [`KrakenError::NonceExhausted`]
    /// rather than repeating or wrapping.
    fn next_nonce(&self) -> Result<u64, KrakenError>;
}

/// A nonce provider that generates strictly increasing millisecond timestamps.
///
/// When two requests land in the same millisecond (or the clock steps back),
/// the provider hands out `last + 1` instead, so values never repeat or
/// decrease across threads.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create a provider whose first nonce is greater than `last`.
    ///
    /// Use this to resume above the last nonce the venue is known to have
    /// accepted for a key. With `last == u64::MAX` every call fails with
    /// [`KrakenError::NonceExhausted`].
    pub fn starting_after(last: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(last),
        }
    }

    /// Get current time in milliseconds since UNIX epoch.
    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> Result<u64, KrakenError> {
        let now = Self::current_time_millis();
        let mut last = self.last_nonce.load(Ordering::SeqCst);

        loop {
            let next = last
                .checked_add(1)
                .ok_or(KrakenError::NonceExhausted)?
                .max(now);
            match self
                .last_nonce
                .compare_exchange_weak(last, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Ok(next),
                Err(current) => last = current,
            }
        }
    }
}
