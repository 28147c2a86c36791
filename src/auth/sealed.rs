//! Credentials whose private key is sealed by the vault.

use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::error::KrakenError;
use crate::vault::{EncryptedSecret, RandomSource, Vault};

/// A Kraken credential pair as it is persisted.
///
/// The public key is stored in clear; the private key is sealed under a
/// password. Unlocking yields ordinary [`Credentials`] for signing.
///
/// ```rust,no_run
/// use kraken_vault::auth::EncryptedCredentials;
///
/// # fn main() -> Result<(), kraken_vault::KrakenError> {
/// let sealed = EncryptedCredentials::seal("public_key", "cHJpdmF0ZV9rZXk=", "password")?;
/// let credentials = sealed.unlock("password")?;
/// assert_eq!(credentials.api_key, "public_key");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedCredentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// The sealed private key
    pub secret: EncryptedSecret,
}

impl EncryptedCredentials {
    /// Environment variable holding the hex salt of the sealed private key.
    pub const SALT_VAR: &'static str = "KRAKEN_API_SECRET_SALT";
    /// Environment variable holding the hex envelope of the sealed private key.
    pub const CIPHERTEXT_VAR: &'static str = "KRAKEN_API_SECRET_ENC";

    /// Seal a credential pair under `password`.
    pub fn seal(
        api_key: impl Into<String>,
        api_secret: &str,
        password: &str,
    ) -> Result<Self, KrakenError> {
        Self::seal_with(&Vault::new(), api_key, api_secret, password)
    }

    /// Seal a credential pair using a specific vault.
    pub fn seal_with<R: RandomSource>(
        vault: &Vault<R>,
        api_key: impl Into<String>,
        api_secret: &str,
        password: &str,
    ) -> Result<Self, KrakenError> {
        Ok(Self {
            api_key: api_key.into(),
            secret: vault.encrypt_secret(password, api_secret)?,
        })
    }

    /// Decrypt the private key and return usable credentials.
    pub fn unlock(&self, password: &str) -> Result<Credentials, KrakenError> {
        let api_secret = self.secret.open(password)?;
        tracing::debug!(api_key = %self.api_key, "unlocked credentials");
        Ok(Credentials::from_secret(self.api_key.clone(), api_secret))
    }

    /// Re-seal the private key under a new password.
    pub fn rotate(&self, old_password: &str, new_password: &str) -> Result<Self, KrakenError> {
        self.rotate_with(&Vault::new(), old_password, new_password)
    }

    /// Re-seal the private key using a specific vault.
    pub fn rotate_with<R: RandomSource>(
        &self,
        vault: &Vault<R>,
        old_password: &str,
        new_password: &str,
    ) -> Result<Self, KrakenError> {
        Ok(Self {
            api_key: self.api_key.clone(),
            secret: self.secret.rotate_with(vault, old_password, new_password)?,
        })
    }

    /// Try to read a sealed credential pair from the environment.
    ///
    /// Reads `KRAKEN_API_KEY`, `KRAKEN_API_SECRET_SALT` and
    /// `KRAKEN_API_SECRET_ENC`. Returns `None` if any of them is unset.
    pub fn try_from_env() -> Option<Self> {
        let api_key = std::env::var(super::EnvCredentials::KEY_VAR).ok()?;
        let salt = std::env::var(Self::SALT_VAR).ok()?;
        let ciphertext = std::env::var(Self::CIPHERTEXT_VAR).ok()?;

        Some(Self {
            api_key,
            secret: EncryptedSecret { salt, ciphertext },
        })
    }
}
