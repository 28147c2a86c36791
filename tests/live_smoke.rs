use base64::{Engine as _, engine::general_purpose::STANDARD};

use kraken_vault::auth::{CredentialsProvider, EncryptedCredentials, EnvCredentials, sign_request};
use kraken_vault::futures::endpoints;

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

/// Unlocks the sealed credentials from `.env` and checks the secret is usable.
#[test]
#[ignore]
fn live_sealed_credentials_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let sealed = match EncryptedCredentials::try_from_env() {
        Some(sealed) => sealed,
        None => return Ok(()),
    };
    let password = match std::env::var("KRAKEN_VAULT_PASSWORD") {
        Ok(password) => password,
        Err(_) => return Ok(()),
    };

    let credentials = sealed.unlock(&password)?;
    assert!(STANDARD.decode(credentials.expose_secret()).is_ok());

    let signature = sign_request(&credentials, endpoints::private::OPEN_POSITIONS, 1, "")?;
    assert_eq!(signature.len(), 88);

    Ok(())
}

/// Signs with plaintext credentials from the environment.
#[test]
#[ignore]
fn live_plain_credentials_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let provider = match EnvCredentials::try_from_env() {
        Some(provider) => provider,
        None => return Ok(()),
    };

    let signature = sign_request(
        provider.get_credentials(),
        endpoints::private::ACCOUNTS,
        1,
        "",
    )?;
    assert_eq!(signature.len(), 88);

    Ok(())
}
