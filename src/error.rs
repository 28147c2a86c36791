//! Error types for the Kraken vault library.

use thiserror::Error;

/// The main error type for all vault and signing operations.
///
/// Messages never carry secret material: no keys, passwords or plaintext.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KrakenError {
    /// A numeric argument was outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input could not be decoded (bad hex, truncated envelope, non UTF-8 plaintext)
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Key material failed to decode or has an unusable length
    #[error("Key error: {0}")]
    KeyError(String),

    /// The AEAD tag did not verify.
    ///
    /// Wrong password, wrong key, and tampered ciphertext are deliberately
    /// indistinguishable.
    #[error("Authentication failed: ciphertext could not be verified")]
    AuthenticationFailure,

    /// The random source failed to produce bytes
    #[error("Random source failure: {0}")]
    Entropy(String),

    /// The nonce provider has no value left above the last issued nonce
    #[error("Nonce exhausted: no strictly greater nonce is available")]
    NonceExhausted,

    /// Request parameters could not be rendered as canonical data
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl KrakenError {
    /// Check if this is a ciphertext verification failure.
    ///
    /// Callers typically treat this as "wrong password" and prompt again.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailure)
    }

    /// Check if the failure is caused by the caller's input rather than by the
    /// ciphertext or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter(_) | Self::MalformedInput(_) | Self::KeyError(_)
        )
    }
}
