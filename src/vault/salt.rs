//! Salt generation.

use crate::error::KrakenError;
use crate::vault::random::RandomSource;

/// Salt length used when sealing a secret.
pub const SALT_SIZE: usize = 32;

/// Largest accepted random buffer, in bytes.
pub const MAX_RANDOM_SIZE: usize = 1024;

/// Generate `size` random bytes from `source` and return them as lowercase hex.
///
/// `size` must lie in `[1, 1024]`.
pub(crate) fn generate_hex(source: &dyn RandomSource, size: usize) -> Result<String, KrakenError> {
    if size == 0 || size > MAX_RANDOM_SIZE {
        return Err(KrakenError::InvalidParameter(format!(
            "random size {size} must be in range [1, {MAX_RANDOM_SIZE}]"
        )));
    }

    let mut bytes = vec![0u8; size];
    source.fill(&mut bytes)?;
    Ok(hex::encode(bytes))
}
