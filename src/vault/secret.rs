//! Password-sealed secrets: the persisted salt and envelope pair.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::KrakenError;
use crate::vault::Vault;
use crate::vault::random::RandomSource;

/// A secret sealed under a password, in the form it is stored.
///
/// Both fields are lowercase hex. The record is immutable once created;
/// changing the password produces a new record via [`EncryptedSecret::rotate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    /// Salt the key was derived with
    pub salt: String,
    /// `nonce || ciphertext || tag`
    pub ciphertext: String,
}

impl EncryptedSecret {
    /// Seal `secret` under `password` with a fresh salt and nonce.
    pub fn seal(password: &str, secret: &str) -> Result<Self, KrakenError> {
        Vault::new().encrypt_secret(password, secret)
    }

    /// Seal using a specific vault (and therefore random source).
    pub fn seal_with<R: RandomSource>(
        vault: &Vault<R>,
        password: &str,
        secret: &str,
    ) -> Result<Self, KrakenError> {
        vault.encrypt_secret(password, secret)
    }

    /// Recover the secret.
    ///
    /// A wrong password surfaces as [`KrakenError::AuthenticationFailure`].
    pub fn open(&self, password: &str) -> Result<SecretString, KrakenError> {
        super::decrypt_secret(&self.salt, password, &self.ciphertext)
    }

    /// Re-seal the secret under a new password.
    ///
    /// The result always carries a new salt and nonce, even when the password
    /// does not change.
    pub fn rotate(&self, old_password: &str, new_password: &str) -> Result<Self, KrakenError> {
        self.rotate_with(&Vault::new(), old_password, new_password)
    }

    /// Re-seal using a specific vault (and therefore random source).
    pub fn rotate_with<R: RandomSource>(
        &self,
        vault: &Vault<R>,
        old_password: &str,
        new_password: &str,
    ) -> Result<Self, KrakenError> {
        let secret = self.open(old_password)?;
        Self::seal_with(vault, new_password, secret.expose_secret())
    }
}
