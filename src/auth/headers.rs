//! Authentication header values for a signed request.

/// Header carrying the public API key.
pub const API_KEY_HEADER: &str = "APIKey";
/// Header carrying the signature.
pub const AUTHENT_HEADER: &str = "Authent";
/// Header carrying the nonce the signature was computed with.
pub const NONCE_HEADER: &str = "Nonce";

/// The three header values Kraken Futures needs to authenticate a request.
///
/// Values are ready to send verbatim. The signature is bound to the nonce, so
/// the headers must travel together and be sent at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Public API key
    pub api_key: String,
    /// Base64 HMAC-SHA512 signature
    pub authent: String,
    /// Decimal nonce
    pub nonce: String,
}

impl AuthHeaders {
    /// Header name/value pairs in the order Kraken documents them.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (AUTHENT_HEADER, self.authent.as_str()),
            (NONCE_HEADER, self.nonce.as_str()),
        ]
        .into_iter()
    }
}
