//! HMAC-SHA512 signature generation for Kraken Futures authentication.
//!
//! Kraken Futures private endpoints require an `Authent` header computed as:
//!
//! ```text
//! HMAC-SHA512(SHA256(postData + nonce + endpointPath), base64_decode(api_secret))
//! ```
//!
//! `endpointPath` is the request path with the `/derivatives` routing prefix
//! removed, e.g. `/derivatives/api/v3/sendorder` is signed as
//! `/api/v3/sendorder`. `postData` is the exact query string (without `?`) or
//! URL-encoded body that goes on the wire.
//!
//! ## Nonces
//!
//! Signing is stateless and accepts whatever nonce it is given. Callers must
//! issue nonces that strictly increase per API key in transmission order, for
//! example through a shared [`IncreasingNonce`](crate::auth::IncreasingNonce).
//! A stale nonce is only detected by the venue, which rejects the request.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroizing;

use crate::auth::Credentials;
use crate::error::KrakenError;

type HmacSha512 = Hmac<Sha512>;

/// Routing prefix Kraken Futures strips before verifying a signature.
pub const DEFAULT_PATH_PREFIX: &str = "/derivatives";

/// Signature settings tied to the venue's URL layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    /// Leading path segment removed from the endpoint before hashing
    pub path_prefix: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }
}

impl SignerConfig {
    /// Create a config stripping `path_prefix`.
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
        }
    }

    /// A config that signs endpoint paths verbatim.
    pub fn without_prefix() -> Self {
        Self::new("")
    }

    /// The path as it enters the signature digest.
    pub fn normalize_path<'a>(&self, endpoint_path: &'a str) -> &'a str {
        endpoint_path
            .strip_prefix(self.path_prefix.as_str())
            .unwrap_or(endpoint_path)
    }

    /// Sign a request with these settings.
    ///
    /// See [`sign`] for the argument contract.
    pub fn sign(
        &self,
        endpoint_path: &str,
        canonical_data: &str,
        nonce: u64,
        private_key_b64: &str,
    ) -> Result<String, KrakenError> {
        // Decode the API secret from base64.
        let secret_decoded = Zeroizing::new(
            BASE64
                .decode(private_key_b64)
                .map_err(|_| KrakenError::KeyError("API secret must be valid base64.".to_string()))?,
        );

        // SHA-256 over postData + nonce + endpointPath.
        let nonce_str = nonce.to_string();
        let mut sha256_hasher = Sha256::new();
        sha256_hasher.update(canonical_data.as_bytes());
        sha256_hasher.update(nonce_str.as_bytes());
        sha256_hasher.update(self.normalize_path(endpoint_path).as_bytes());
        let sha256_hash = sha256_hasher.finalize();

        // HMAC-SHA-512 with the decoded secret.
        let mut hmac = HmacSha512::new_from_slice(&secret_decoded)
            .map_err(|e| KrakenError::KeyError(format!("Invalid HMAC key: {e}")))?;
        hmac.update(&sha256_hash);
        let hmac_result = hmac.finalize().into_bytes();

        tracing::debug!(endpoint_path, nonce, "signed request");

        // Base64 encode the result.
        Ok(BASE64.encode(hmac_result))
    }
}

/// Sign a request for Kraken's Futures API.
///
/// # Arguments
///
/// * `endpoint_path` - The full request path (e.g., "/derivatives/api/v3/sendorder")
/// * `canonical_data` - The exact query string or URL-encoded body sent on the
///   wire, without a leading `?` (empty for parameterless GET requests)
/// * `nonce` - The nonce value for this request; must be strictly greater than
///   the previous nonce used with this key
/// * `private_key_b64` - The base64 API secret as issued by Kraken
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature for the `Authent` header.
///
/// # Example
///
/// ```rust
/// use kraken_vault::auth::sign;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = sign(
///     "/derivatives/api/v3/sendorder",
///     "symbol=PI_XBTUSD&side=buy&orderType=lmt&size=1&limitPrice=10000",
///     1616492376594,
///     "YXBpX3NlY3JldA==", // base64 of "api_secret"
/// )?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign(
    endpoint_path: &str,
    canonical_data: &str,
    nonce: u64,
    private_key_b64: &str,
) -> Result<String, KrakenError> {
    SignerConfig::default().sign(endpoint_path, canonical_data, nonce, private_key_b64)
}

/// Sign a request with the private key held by `credentials`.
///
/// Same contract as [`sign`]; argument order follows the request layout.
pub fn sign_request(
    credentials: &Credentials,
    endpoint_path: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, KrakenError> {
    sign(endpoint_path, post_data, nonce, credentials.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> String {
        BASE64.encode("test_secret_key_for_signing")
    }

    #[test]
    fn test_known_signatures() {
        // Reference values computed independently with Python's hashlib/hmac.
        let cases = [
            (
                "/derivatives/api/v3/sendorder",
                "orderType=lmt&symbol=PI_XBTUSD&side=buy&size=1&limitPrice=10000",
                1616492376594,
                "OVJsZuqG9Ea/gayxroVnUgLBEBucW/+g/uNEcBrBbEn3NxWMURkOFIO/bn1l0fjLvWUnUOHdf2L2NjpVhX066w==",
            ),
            (
                "/derivatives/api/v3/openpositions",
                "",
                1616492376594,
                "LvB5taStrdErSWch+QeIZVf4OG5HrDJRdiTEa73HUMoYKxJYRbyL03hdxk9OedL83HNsO2/n4ENno+gQy1rvcA==",
            ),
            (
                "/derivatives/api/v3/fills",
                "lastFillTime=1700000000000",
                1700000000123,
                "/yz6DO1j+K18U5sZsE624hF07hnvH8DbI39fEwYq4VCaNMrZDg2Hbb5gXTcE9HoYLpuNpqDBpTdByUe+hLpYKQ==",
            ),
        ];

        for (path, data, nonce, expected) in cases {
            assert_eq!(sign(path, data, nonce, &secret()).unwrap(), expected, "{path}");
        }
    }

    #[test]
    fn test_signature_generation() {
        let signature = sign(
            "/derivatives/api/v3/sendorder",
            "symbol=PI_XBTUSD&side=buy&orderType=lmt",
            1616492376594,
            &secret(),
        )
        .unwrap();

        // HMAC-SHA512 produces 64 bytes, base64 encoded = 88 chars (with padding)
        assert!(BASE64.decode(&signature).is_ok());
        assert_eq!(signature.len(), 88);
    }

    #[test]
    fn test_signature_consistency() {
        let sig1 = sign("/derivatives/api/v3/accounts", "", 12345, &secret()).unwrap();
        let sig2 = sign("/derivatives/api/v3/accounts", "", 12345, &secret()).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_prefix_is_stripped() {
        let with_prefix = sign("/derivatives/api/v3/accounts", "", 12345, &secret()).unwrap();
        let without = sign("/api/v3/accounts", "", 12345, &secret()).unwrap();
        assert_eq!(with_prefix, without);

        let verbatim = SignerConfig::without_prefix()
            .sign("/derivatives/api/v3/accounts", "", 12345, &secret())
            .unwrap();
        assert_ne!(with_prefix, verbatim);
    }

    #[test]
    fn test_normalize_path() {
        let config = SignerConfig::default();
        assert_eq!(config.normalize_path("/derivatives/api/v3/fills"), "/api/v3/fills");
        assert_eq!(config.normalize_path("/api/v3/fills"), "/api/v3/fills");
        // Only a leading occurrence is removed.
        assert_eq!(
            config.normalize_path("/api/derivatives/fills"),
            "/api/derivatives/fills"
        );
    }

    #[test]
    fn test_signature_changes_with_nonce() {
        let sig1 = sign("/derivatives/api/v3/accounts", "", 12345, &secret()).unwrap();
        let sig2 = sign("/derivatives/api/v3/accounts", "", 12346, &secret()).unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_path() {
        let sig1 = sign("/derivatives/api/v3/accounts", "", 12345, &secret()).unwrap();
        let sig2 = sign("/derivatives/api/v3/openpositions", "", 12345, &secret()).unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_data() {
        let path = "/derivatives/api/v3/sendorder";
        let sig1 = sign(path, "symbol=PI_XBTUSD", 12345, &secret()).unwrap();
        let sig2 = sign(path, "symbol=PI_XBTUSE", 12345, &secret()).unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_key() {
        let path = "/derivatives/api/v3/accounts";
        let sig1 = sign(path, "", 12345, &BASE64.encode("key_one")).unwrap();
        let sig2 = sign(path, "", 12345, &BASE64.encode("key_two")).unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_invalid_base64_secret() {
        let result = sign("/derivatives/api/v3/accounts", "", 12345, "%%%not-base64%%%");
        assert!(matches!(result, Err(KrakenError::KeyError(_))));
    }

    #[test]
    fn test_sign_request_uses_credentials() {
        let credentials = Credentials::new("key", secret());
        let via_credentials =
            sign_request(&credentials, "/derivatives/api/v3/fills", 99, "lastFillTime=1").unwrap();
        let direct = sign("/derivatives/api/v3/fills", "lastFillTime=1", 99, &secret()).unwrap();
        assert_eq!(via_credentials, direct);
    }
}
