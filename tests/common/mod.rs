//! Shared fixtures for integration tests
#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsajwt::{ClaimSet, Issuer, KeyEncoding, PrivateKey, Validator, keys};
use serde_json::{Value, json};
use sha2::{Sha256, Sha384, Sha512};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const ISSUER: &str = "svc-a";
pub const AUDIENCE: &str = "svc-b";
pub const SUBJECT: &str = "user-1";

/// Route library events to the test writer; filter with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rsajwt=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Key shared by every test in the binary
pub fn signing_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| keys::generate().unwrap())
}

/// A second, unrelated key
pub fn other_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| keys::generate().unwrap())
}

pub fn public_pem() -> String {
    keys::derive_public_pem(signing_key(), KeyEncoding::Pem).unwrap()
}

pub fn issuer() -> Issuer {
    Issuer::from_key(signing_key().clone()).unwrap()
}

pub fn validator() -> Validator {
    Validator::new(&public_pem(), ISSUER, AUDIENCE).unwrap()
}

pub fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

/// Complete claim set issued at `iat`, valid for an hour
pub fn claims_at(iat: i64) -> ClaimSet {
    ClaimSet::try_from(json!({
        "iss": ISSUER,
        "aud": [AUDIENCE],
        "sub": SUBJECT,
        "iat": iat,
        "exp": iat + 3600,
    }))
    .unwrap()
}

pub fn segment(value: &Value) -> String {
    URL_SAFE_NO_PAD.encode(value.to_string().as_bytes())
}

/// Build and sign a token by hand, bypassing the issuer's checks
///
/// The hash follows the `alg` suffix (384, 512, otherwise SHA-256).
pub fn forge(alg: &str, payload: &Value, key: &PrivateKey) -> String {
    let signing_input = format!(
        "{}.{}",
        segment(&json!({"alg": alg, "typ": "JWT"})),
        segment(payload)
    );

    let mut rng = rand::thread_rng();
    let signature = if alg.ends_with("384") {
        SigningKey::<Sha384>::new(key.clone())
            .sign_with_rng(&mut rng, signing_input.as_bytes())
            .to_vec()
    } else if alg.ends_with("512") {
        SigningKey::<Sha512>::new(key.clone())
            .sign_with_rng(&mut rng, signing_input.as_bytes())
            .to_vec()
    } else {
        SigningKey::<Sha256>::new(key.clone())
            .sign_with_rng(&mut rng, signing_input.as_bytes())
            .to_vec()
    };

    format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature))
}

/// Payload with every registered claim the validator checks, valid at `now`
pub fn payload_at(now: i64) -> Value {
    json!({
        "iss": ISSUER,
        "aud": [AUDIENCE],
        "sub": SUBJECT,
        "iat": now,
        "exp": now + 3600,
    })
}

/// Replace one of the three token segments
pub fn replace_segment(token: &str, index: usize, replacement: &str) -> String {
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[index] = replacement;
    parts.join(".")
}
