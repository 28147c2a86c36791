//! Credential vault.
//!
//! Secrets such as exchange API keys are stored encrypted under a key derived
//! from a human password:
//!
//! ```text
//! key      = PBKDF2-HMAC-SHA256(password, salt, 100_000 iterations, 32 bytes)
//! envelope = nonce || AES-256-GCM(key, nonce, secret)
//! ```
//!
//! The salt and the envelope are stored together as lowercase hex. The key is
//! never stored; it is recomputed whenever a secret is opened.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kraken_vault::vault;
//! use secrecy::ExposeSecret;
//!
//! # fn main() -> Result<(), kraken_vault::KrakenError> {
//! let sealed = vault::encrypt_secret("correct horse", "cHJpdmF0ZV9rZXk=")?;
//! let secret = vault::decrypt_secret(&sealed.salt, "correct horse", &sealed.ciphertext)?;
//! assert_eq!(secret.expose_secret(), "cHJpdmF0ZV9rZXk=");
//! # Ok(())
//! # }
//! ```
//!
//! The free functions draw randomness from the operating system. Use
//! [`Vault::with_source`] to inject a different [`RandomSource`].

mod cipher;
mod kdf;
mod random;
mod salt;
mod secret;

pub use cipher::{NONCE_SIZE, TAG_SIZE};
pub use kdf::{KEY_SIZE, PBKDF2_ITERATIONS};
pub use random::{OsRandom, RandomSource};
pub use salt::{MAX_RANDOM_SIZE, SALT_SIZE};
pub use secret::EncryptedSecret;

use secrecy::{ExposeSecret, SecretString};

use crate::error::KrakenError;

/// Vault operations bound to a random source.
///
/// Every method is a pure function of its inputs plus fresh randomness, so a
/// single vault can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Vault<R = OsRandom> {
    source: R,
}

impl Vault<OsRandom> {
    /// Create a vault backed by the operating system CSPRNG.
    pub fn new() -> Self {
        Self { source: OsRandom }
    }
}

impl<R: RandomSource> Vault<R> {
    /// Create a vault drawing randomness from `source`.
    pub fn with_source(source: R) -> Self {
        Self { source }
    }

    /// Generate `size` random bytes as a lowercase hex string.
    ///
    /// Fails with [`KrakenError::InvalidParameter`] unless `size` is in
    /// `[1, 1024]`.
    pub fn generate_salt(&self, size: usize) -> Result<String, KrakenError> {
        salt::generate_hex(&self.source, size)
    }

    /// Derive the 32-byte key for `salt_hex` and `password`, as hex.
    pub fn derive_key(&self, salt_hex: &str, password: &str) -> Result<SecretString, KrakenError> {
        kdf::derive_key(salt_hex, password)
    }

    /// Encrypt `plaintext` under a hex key, returning the hex envelope.
    pub fn encrypt(&self, key_hex: &str, plaintext: &str) -> Result<String, KrakenError> {
        cipher::encrypt(&self.source, key_hex, plaintext)
    }

    /// Decrypt a hex envelope under a hex key.
    pub fn decrypt(&self, key_hex: &str, cipher_hex: &str) -> Result<SecretString, KrakenError> {
        cipher::decrypt(key_hex, cipher_hex)
    }

    /// Encrypt raw bytes under a raw 16, 24 or 32-byte key.
    pub fn encrypt_bytes(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, KrakenError> {
        cipher::encrypt_bytes(&self.source, key, plaintext)
    }

    /// Decrypt a raw envelope produced by [`Vault::encrypt_bytes`].
    pub fn decrypt_bytes(&self, key: &[u8], envelope: &[u8]) -> Result<Vec<u8>, KrakenError> {
        cipher::decrypt_bytes(key, envelope)
    }

    /// Seal `secret` under `password` with a fresh 32-byte salt.
    ///
    /// Two calls with identical inputs never return the same salt or
    /// ciphertext.
    pub fn encrypt_secret(
        &self,
        password: &str,
        secret: &str,
    ) -> Result<EncryptedSecret, KrakenError> {
        let salt = self.generate_salt(SALT_SIZE)?;
        let key = kdf::derive_key(&salt, password)?;
        let ciphertext = cipher::encrypt(&self.source, key.expose_secret(), secret)?;

        tracing::debug!(secret_len = secret.len(), "sealed secret");
        Ok(EncryptedSecret { salt, ciphertext })
    }

    /// Open a secret sealed by [`Vault::encrypt_secret`].
    pub fn decrypt_secret(
        &self,
        salt_hex: &str,
        password: &str,
        cipher_hex: &str,
    ) -> Result<SecretString, KrakenError> {
        decrypt_secret(salt_hex, password, cipher_hex)
    }
}

/// Generate `size` random bytes as lowercase hex, from the OS CSPRNG.
pub fn generate_salt(size: usize) -> Result<String, KrakenError> {
    Vault::new().generate_salt(size)
}

/// Derive the hex key for `salt_hex` and `password`.
pub fn derive_key(salt_hex: &str, password: &str) -> Result<SecretString, KrakenError> {
    kdf::derive_key(salt_hex, password)
}

/// Encrypt `plaintext` under a hex key with a fresh OS-random nonce.
pub fn encrypt(key_hex: &str, plaintext: &str) -> Result<String, KrakenError> {
    Vault::new().encrypt(key_hex, plaintext)
}

/// Decrypt a hex envelope under a hex key.
pub fn decrypt(key_hex: &str, cipher_hex: &str) -> Result<SecretString, KrakenError> {
    cipher::decrypt(key_hex, cipher_hex)
}

/// Seal `secret` under `password`, returning the salt and envelope.
pub fn encrypt_secret(password: &str, secret: &str) -> Result<EncryptedSecret, KrakenError> {
    Vault::new().encrypt_secret(password, secret)
}

/// Recover a secret from its salt, password and envelope.
pub fn decrypt_secret(
    salt_hex: &str,
    password: &str,
    cipher_hex: &str,
) -> Result<SecretString, KrakenError> {
    let key = kdf::derive_key(salt_hex, password)?;
    cipher::decrypt(key.expose_secret(), cipher_hex)
}
