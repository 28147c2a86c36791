//! Authentication module for Kraken Futures.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Password-sealed credentials backed by the [`vault`](crate::vault)
//! - Nonce generation for replay attack prevention
//! - Canonical request data shared by the signature and the wire
//! - HMAC-SHA512 signature generation for authenticated requests

pub mod canonical;
mod credentials;
mod headers;
mod nonce;
mod sealed;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use headers::{API_KEY_HEADER, AUTHENT_HEADER, AuthHeaders, NONCE_HEADER};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use sealed::EncryptedCredentials;
pub use signature::{DEFAULT_PATH_PREFIX, SignerConfig, sign, sign_request};
