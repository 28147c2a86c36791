//! # Kraken Vault
//!
//! Password-sealed credential storage and request signing for the Kraken
//! Futures API.
//!
//! ## Features
//!
//! - PBKDF2-HMAC-SHA256 key derivation from a password and a stored salt
//! - AES-GCM encryption of API secrets with self-describing hex envelopes
//! - Byte-exact Futures request signatures (SHA-256 + HMAC-SHA512)
//! - Strictly increasing nonces that are safe across threads
//! - Secrets kept behind `secrecy` and zeroized on drop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_vault::auth::{EncryptedCredentials, sign};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Enrollment: seal the private key once and store the record.
//! let sealed = EncryptedCredentials::seal("public_key", "c2VjcmV0X2tleQ==", "password")?;
//!
//! // Later: unlock and sign.
//! let credentials = sealed.unlock("password")?;
//! let signature = sign(
//!     "/derivatives/api/v3/openpositions",
//!     "",
//!     1700000000000,
//!     credentials.expose_secret(),
//! )?;
//! println!("Authent: {signature}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod futures;
pub mod vault;

// Re-export commonly used types at crate root
pub use error::KrakenError;
pub use vault::{EncryptedSecret, Vault};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
