//! Request signer bound to one set of credentials.

use std::sync::Arc;

use crate::auth::{
    AuthHeaders, CredentialsProvider, IncreasingNonce, NonceProvider, SignerConfig,
};
use crate::error::KrakenError;

/// Produces authentication headers for Kraken Futures requests.
///
/// Each call to [`FuturesSigner::authenticate`] draws a fresh nonce from the
/// signer's [`NonceProvider`] and signs with it. Share one signer (or at least
/// one nonce provider) per API key so nonces keep increasing, and send
/// requests in the order they were authenticated.
///
/// ```rust
/// use std::sync::Arc;
/// use kraken_vault::auth::StaticCredentials;
/// use kraken_vault::futures::{FuturesSigner, endpoints};
///
/// # fn main() -> Result<(), kraken_vault::KrakenError> {
/// let signer = FuturesSigner::builder()
///     .credentials(Arc::new(StaticCredentials::new("public", "c2VjcmV0")))
///     .build()?;
/// let headers = signer.authenticate(endpoints::private::OPEN_POSITIONS, "")?;
/// assert_eq!(headers.api_key, "public");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FuturesSigner {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    config: SignerConfig,
}

impl FuturesSigner {
    /// Create a signer with the default nonce provider and path prefix.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            credentials,
            nonce_provider: Arc::new(IncreasingNonce::new()),
            config: SignerConfig::default(),
        }
    }

    /// Create a builder for configuring the signer.
    pub fn builder() -> FuturesSignerBuilder {
        FuturesSignerBuilder::new()
    }

    /// Signature settings in use.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign a request to `endpoint_path` carrying `canonical_data`.
    ///
    /// `canonical_data` must be the exact query string (without `?`) or body
    /// that will be transmitted; see [`canonical`](crate::auth::canonical).
    pub fn authenticate(
        &self,
        endpoint_path: &str,
        canonical_data: &str,
    ) -> Result<AuthHeaders, KrakenError> {
        let nonce = self.nonce_provider.next_nonce()?;
        self.authenticate_with_nonce(endpoint_path, canonical_data, nonce)
    }

    /// Sign with a caller-supplied nonce.
    ///
    /// The caller is responsible for the nonce being strictly greater than
    /// every nonce previously used with these credentials.
    pub fn authenticate_with_nonce(
        &self,
        endpoint_path: &str,
        canonical_data: &str,
        nonce: u64,
    ) -> Result<AuthHeaders, KrakenError> {
        let creds = self.credentials.get_credentials();
        let authent = self
            .config
            .sign(endpoint_path, canonical_data, nonce, creds.expose_secret())?;

        Ok(AuthHeaders {
            api_key: creds.api_key.clone(),
            authent,
            nonce: nonce.to_string(),
        })
    }
}

impl std::fmt::Debug for FuturesSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuturesSigner")
            .field("credentials", self.credentials.get_credentials())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`FuturesSigner`].
#[derive(Default)]
pub struct FuturesSignerBuilder {
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    config: Option<SignerConfig>,
}

impl FuturesSignerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the credentials provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Override the signature settings.
    pub fn config(mut self, config: SignerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the routing prefix stripped before hashing.
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = Some(SignerConfig::new(prefix));
        self
    }

    /// Build the signer.
    ///
    /// Fails with [`KrakenError::KeyError`] when no credentials were supplied.
    pub fn build(self) -> Result<FuturesSigner, KrakenError> {
        let credentials = self
            .credentials
            .ok_or_else(|| KrakenError::KeyError("credentials are required to sign".to_string()))?;
        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));

        Ok(FuturesSigner {
            credentials,
            nonce_provider,
            config: self.config.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, sign};
    use crate::futures::endpoints::private;
    use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

    struct FixedNonce(u64);

    impl NonceProvider for FixedNonce {
        fn next_nonce(&self) -> Result<u64, KrakenError> {
            Ok(self.0)
        }
    }

    fn secret() -> String {
        BASE64.encode("my_secret")
    }

    fn signer(nonce: u64) -> FuturesSigner {
        FuturesSigner::builder()
            .credentials(Arc::new(Credentials::new("pub", secret())))
            .nonce_provider(Arc::new(FixedNonce(nonce)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_authenticate_matches_sign() {
        let headers = signer(12345).authenticate(private::FILLS, "lastFillTime=1").unwrap();

        assert_eq!(headers.api_key, "pub");
        assert_eq!(headers.nonce, "12345");
        assert_eq!(
            headers.authent,
            sign(private::FILLS, "lastFillTime=1", 12345, &secret()).unwrap()
        );
    }

    #[test]
    fn test_default_signer_nonces_increase() {
        let signer = FuturesSigner::new(Arc::new(Credentials::new("pub", secret())));
        let first = signer.authenticate(private::OPEN_ORDERS, "").unwrap();
        let second = signer.authenticate(private::OPEN_ORDERS, "").unwrap();

        let n1: u64 = first.nonce.parse().unwrap();
        let n2: u64 = second.nonce.parse().unwrap();
        assert!(n2 > n1);
        assert_ne!(first.authent, second.authent);
    }

    #[test]
    fn test_custom_prefix() {
        let signer = FuturesSigner::builder()
            .credentials(Arc::new(Credentials::new("pub", secret())))
            .path_prefix("/futures")
            .build()
            .unwrap();

        let headers = signer
            .authenticate_with_nonce("/futures/api/v3/accounts", "", 7)
            .unwrap();
        assert_eq!(
            headers.authent,
            sign("/api/v3/accounts", "", 7, &secret()).unwrap()
        );
    }

    #[test]
    fn test_build_without_credentials() {
        let result = FuturesSigner::builder().build();
        assert!(matches!(result, Err(KrakenError::KeyError(_))));
    }

    #[test]
    fn test_invalid_secret_surfaces_key_error() {
        let signer = FuturesSigner::new(Arc::new(Credentials::new("pub", "%%%not-base64%%%")));
        let result = signer.authenticate(private::ACCOUNTS, "");
        assert!(matches!(result, Err(KrakenError::KeyError(_))));
    }

    #[test]
    fn test_exhausted_nonce_provider_is_an_error() {
        let signer = FuturesSigner::builder()
            .credentials(Arc::new(Credentials::new("pub", secret())))
            .nonce_provider(Arc::new(IncreasingNonce::starting_after(u64::MAX)))
            .build()
            .unwrap();

        let result = signer.authenticate(private::OPEN_ORDERS, "");
        assert_eq!(result.unwrap_err(), KrakenError::NonceExhausted);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer(1));
        assert!(debug.contains("pub"));
        assert!(!debug.contains(&secret()));
    }
}
