//! AES-GCM sealing of secrets.
//!
//! Envelope layout (before hex encoding):
//!
//! ```text
//! [nonce: 12 bytes][ciphertext: len(plaintext)][tag: 16 bytes]
//! ```
//!
//! The key length picks the cipher: 16 bytes for AES-128, 24 for AES-192 and
//! 32 for AES-256. Keys derived by the vault are always 32 bytes.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use secrecy::SecretString;
use zeroize::{Zeroize, Zeroizing};

use crate::error::KrakenError;
use crate::vault::random::RandomSource;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES-GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

enum GcmCipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl GcmCipher {
    fn new(key: &[u8]) -> Result<Self, KrakenError> {
        let invalid = |_| KrakenError::KeyError(format!("invalid AES key length: {}", key.len()));
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Self::Aes128).map_err(invalid),
            24 => Aes192Gcm::new_from_slice(key).map(Self::Aes192).map_err(invalid),
            32 => Aes256Gcm::new_from_slice(key).map(Self::Aes256).map_err(invalid),
            len => Err(KrakenError::KeyError(format!(
                "invalid AES key length: {len} (expected 16, 24 or 32 bytes)"
            ))),
        }
    }

    fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes192(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        }
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, aes_gcm::Error> {
        let nonce = Nonce::from_slice(nonce);
        match self {
            Self::Aes128(c) => c.decrypt(nonce, ciphertext),
            Self::Aes192(c) => c.decrypt(nonce, ciphertext),
            Self::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
    }
}

/// Encrypt raw bytes, returning `nonce || ciphertext || tag`.
pub(crate) fn encrypt_bytes(
    source: &dyn RandomSource,
    key: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, KrakenError> {
    let cipher = GcmCipher::new(key)?;

    let mut nonce = [0u8; NONCE_SIZE];
    source.fill(&mut nonce)?;

    // Only fails for plaintexts beyond the GCM length limit (~64 GiB).
    let ciphertext = cipher.seal(&nonce, plaintext).map_err(|_| {
        KrakenError::InvalidParameter("plaintext too long for AES-GCM".to_string())
    })?;

    let mut envelope = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    envelope.extend_from_slice(&nonce);
    envelope.extend_from_slice(&ciphertext);
    Ok(envelope)
}

/// Verify and decrypt an envelope produced by [`encrypt_bytes`].
pub(crate) fn decrypt_bytes(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>, KrakenError> {
    let cipher = GcmCipher::new(key)?;

    if envelope.len() < NONCE_SIZE {
        return Err(KrakenError::MalformedInput(format!(
            "ciphertext is {} bytes, shorter than the {NONCE_SIZE}-byte nonce",
            envelope.len()
        )));
    }
    let (nonce, ciphertext) = envelope.split_at(NONCE_SIZE);

    cipher.open(nonce, ciphertext).map_err(|_| {
        tracing::warn!(
            envelope_len = envelope.len(),
            "ciphertext failed authentication"
        );
        KrakenError::AuthenticationFailure
    })
}

/// Encrypt a string under a hex key, returning the hex envelope.
pub(crate) fn encrypt(
    source: &dyn RandomSource,
    key_hex: &str,
    plaintext: &str,
) -> Result<String, KrakenError> {
    let key = Zeroizing::new(
        hex::decode(key_hex)
            .map_err(|e| KrakenError::KeyError(format!("key is not valid hex: {e}")))?,
    );

    let envelope = encrypt_bytes(source, &key, plaintext.as_bytes())?;
    Ok(hex::encode(envelope))
}

/// Decrypt a hex envelope under a hex key.
pub(crate) fn decrypt(key_hex: &str, cipher_hex: &str) -> Result<SecretString, KrakenError> {
    let key = Zeroizing::new(
        hex::decode(key_hex)
            .map_err(|e| KrakenError::MalformedInput(format!("key is not valid hex: {e}")))?,
    );
    let envelope = hex::decode(cipher_hex)
        .map_err(|e| KrakenError::MalformedInput(format!("ciphertext is not valid hex: {e}")))?;

    let plaintext = decrypt_bytes(&key, &envelope)?;
    match String::from_utf8(plaintext) {
        Ok(text) => Ok(SecretString::from(text)),
        Err(e) => {
            e.into_bytes().zeroize();
            Err(KrakenError::MalformedInput(
                "decrypted plaintext is not valid UTF-8".to_string(),
            ))
        }
    }
}
