//! Kraken Futures request authentication.
//!
//! ## Authentication
//!
//! The Futures API signs each private request as:
//!
//! ```text
//! Authent = Base64(HMAC-SHA512(SHA256(postData + nonce + path), Base64Decode(secret)))
//! ```
//!
//! where `path` is the endpoint path without the `/derivatives` prefix.
//! [`FuturesSigner`] wraps [`sign`](crate::auth::sign) with a credentials
//! provider and a nonce provider and returns the `APIKey`, `Authent` and
//! `Nonce` header values.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kraken_vault::auth::{EncryptedCredentials, canonical};
//! use kraken_vault::futures::{FuturesSigner, endpoints};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sealed = EncryptedCredentials::try_from_env().ok_or("no sealed credentials")?;
//! let credentials = sealed.unlock("password")?;
//! let signer = FuturesSigner::new(Arc::new(credentials));
//!
//! let body = canonical::encode(&[("symbol", "PF_BCHUSD"), ("side", "buy")])?;
//! let headers = signer.authenticate(endpoints::private::SEND_ORDER, &body)?;
//! for (name, value) in headers.iter() {
//!     println!("{name}: {value}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API Documentation
//!
//! - REST API: <https://docs.kraken.com/api/docs/futures-api>

pub mod endpoints;
mod signer;

pub use signer::{FuturesSigner, FuturesSignerBuilder};
