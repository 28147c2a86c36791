//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! The parameters below are part of the storage format. Changing any of them
//! makes every previously sealed secret unrecoverable.

use pbkdf2::pbkdf2_hmac;
use secrecy::SecretString;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::KrakenError;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derived key length in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Derive a raw 32-byte key from a hex salt and a password.
pub(crate) fn derive_key_bytes(
    salt_hex: &str,
    password: &str,
) -> Result<Zeroizing<[u8; KEY_SIZE]>, KrakenError> {
    let salt = hex::decode(salt_hex)
        .map_err(|e| KrakenError::MalformedInput(format!("salt is not valid hex: {e}")))?;

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut key[..]);
    Ok(key)
}

/// Derive a key from a hex salt and a password, returned as lowercase hex.
///
/// Deterministic: the same salt and password always produce the same key, and
/// any PBKDF2-HMAC-SHA256 implementation with 100,000 iterations and a 32-byte
/// output reproduces it.
pub(crate) fn derive_key(salt_hex: &str, password: &str) -> Result<SecretString, KrakenError> {
    let key = derive_key_bytes(salt_hex, password)?;
    Ok(SecretString::from(hex::encode(&key[..])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    // Cross-checked with Python:
    // hashlib.pbkdf2_hmac('sha256', password, bytes.fromhex(salt), 100000, 32).hex()
    const SALT_1: &str = "1fff99cff0d1751a09d5f521b80286f7bf7c8f2261901f1aa7aa5df6df8cf911";
    const SALT_2: &str = "344feecf40d375380ed5f523b9029647bf7c9f2261e0341a87aa5df6d49c4e31";

    #[test]
    fn test_derive_key_vectors() {
        let cases = [
            (
                SALT_1,
                "cats_and_dogs123",
                "34703f2f8208765c2c2fa1590c6c1b6cfa83d777852248b0d2a1728e131ecf8a",
            ),
            (
                SALT_2,
                "cats_and_dogs123",
                "5f1d3e25d1483b306f281dafccea5ba5f909046a2261a1f7809ecf22093d1b6b",
            ),
            (
                SALT_1,
                "emotion_engine_xoxo",
                "40abe08e11aa7624315c0531cd85c7ec380e136c9716a15a143eaaf816cfeff2",
            ),
            (
                SALT_2,
                "emotion_engine_xoxo",
                "25780cc3a2494b0a784f02a1eebad32bb06bdaadb34857668f54e0b566ca6da6",
            ),
        ];

        for (salt, password, expected) in cases {
            let key = derive_key(salt, password).unwrap();
            assert_eq!(key.expose_secret(), expected, "salt={salt} password={password}");
        }
    }

    #[test]
    fn test_derive_key_deterministic() {
        let k1 = derive_key(SALT_1, "hunter2").unwrap();
        let k2 = derive_key(SALT_1, "hunter2").unwrap();
        assert_eq!(k1.expose_secret(), k2.expose_secret());
        assert_eq!(k1.expose_secret().len(), KEY_SIZE * 2);
    }

    #[test]
    fn test_derive_key_rejects_non_hex_salt() {
        for salt in ["not_hex", "WrongSalt09xk:OK{", "abc"] {
            let result = derive_key(salt, "emotion_engine_xoxo");
            assert!(matches!(result, Err(KrakenError::MalformedInput(_))));
        }
    }

    #[test]
    fn test_derive_key_accepts_uppercase_salt() {
        let lower = derive_key(SALT_2, "pw").unwrap();
        let upper = derive_key(&SALT_2.to_uppercase(), "pw").unwrap();
        assert_eq!(lower.expose_secret(), upper.expose_secret());
    }
}
