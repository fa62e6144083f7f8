//! RSA key material lifecycle
//!
//! Stateless helpers that generate keys and move them between memory and their
//! durable text encodings:
//! - private keys are written as PKCS#1 PEM and read as PKCS#1 or PKCS#8 PEM
//! - public keys are written as SPKI PEM and read as SPKI or PKCS#1 PEM
//!
//! Every reader accepts both the raw PEM convention and the base64-wrapped one
//! (see [`KeyEncoding`]).

mod encoding;

pub use encoding::KeyEncoding;

use crate::error::{DecodeError, DecodeStage, Error, Result};
use crate::limits::{DEFAULT_RSA_BITS, MAX_RSA_BITS, MIN_RSA_BITS};
use encoding::{decode_pem_block, unwrap_pem};
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, LineEnding};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::time::Instant;

/// RSA private key held by an [`Issuer`](crate::Issuer)
pub type PrivateKey = RsaPrivateKey;

/// RSA public key held by a [`Validator`](crate::Validator)
pub type PublicKey = RsaPublicKey;

const PKCS1_PRIVATE_LABEL: &str = "RSA PRIVATE KEY";
const PKCS8_PRIVATE_LABEL: &str = "PRIVATE KEY";
const SPKI_PUBLIC_LABEL: &str = "PUBLIC KEY";
const PKCS1_PUBLIC_LABEL: &str = "RSA PUBLIC KEY";

/// Generate a fresh 2048-bit RSA private key from the OS random source
pub fn generate() -> Result<PrivateKey> {
    generate_with_bits(DEFAULT_RSA_BITS)
}

/// Generate a fresh RSA private key with the given modulus size
///
/// Sizes outside 2048..=4096 bits are refused.
pub fn generate_with_bits(bits: usize) -> Result<PrivateKey> {
    check_key_size(bits)?;

    let started = Instant::now();
    let key = RsaPrivateKey::new(&mut OsRng, bits)
        .map_err(|e| Error::KeyGeneration(e.to_string()))?;
    tracing::debug!(
        bits,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated RSA private key"
    );
    Ok(key)
}

/// Reject modulus sizes the rest of the crate cannot round-trip
pub(crate) fn check_key_size(bits: usize) -> Result<()> {
    if bits < MIN_RSA_BITS {
        return Err(Error::config(format!(
            "RSA key size {bits} is below the minimum of {MIN_RSA_BITS} bits"
        )));
    }
    if bits > MAX_RSA_BITS {
        return Err(Error::config(format!(
            "RSA key size {bits} exceeds the maximum of {MAX_RSA_BITS} bits"
        )));
    }
    Ok(())
}

/// Serialize a private key as PKCS#1 PEM in the requested convention
pub fn encode_private(key: &PrivateKey, encoding: KeyEncoding) -> Result<String> {
    let pem_text = key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Ok(encoding.wrap(&pem_text))
}

/// Derive the SPKI PEM encoding of a key's public component
///
/// Accepts anything exposing RSA public parts, so both private and public keys
/// work. Zero-valued modulus or exponent is rejected with `InvalidKey`.
pub fn derive_public_pem<K>(key: &K, encoding: KeyEncoding) -> Result<String>
where
    K: PublicKeyParts + ?Sized,
{
    if key.n().bits() == 0 {
        return Err(Error::InvalidKey("public modulus is zero".into()));
    }
    if key.e().bits() == 0 {
        return Err(Error::InvalidKey("public exponent is zero".into()));
    }

    let public_key = RsaPublicKey::new(key.n().clone(), key.e().clone())
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    let pem_text = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| Error::InvalidKey(e.to_string()))?;
    Ok(encoding.wrap(&pem_text))
}

/// Parse a private key from PKCS#1 or PKCS#8 PEM, raw or base64-wrapped
pub fn parse_private(text: &str) -> Result<PrivateKey> {
    let pem_text = unwrap_pem(text)?;
    let (label, der) = decode_pem_block(&pem_text)?;

    let key = match label.as_str() {
        PKCS1_PRIVATE_LABEL => RsaPrivateKey::from_pkcs1_der(&der).map_err(structure_error)?,
        PKCS8_PRIVATE_LABEL => RsaPrivateKey::from_pkcs8_der(&der).map_err(structure_error)?,
        other => return Err(unexpected_label(other, "private key").into()),
    };
    Ok(key)
}

/// Parse a public key from SPKI or PKCS#1 PEM, raw or base64-wrapped
pub fn parse_public(text: &str) -> Result<PublicKey> {
    let pem_text = unwrap_pem(text)?;
    let (label, der) = decode_pem_block(&pem_text)?;

    let key = match label.as_str() {
        SPKI_PUBLIC_LABEL => RsaPublicKey::from_public_key_der(&der).map_err(structure_error)?,
        PKCS1_PUBLIC_LABEL => RsaPublicKey::from_pkcs1_der(&der).map_err(structure_error)?,
        other => return Err(unexpected_label(other, "public key").into()),
    };
    Ok(key)
}

fn structure_error(err: impl std::fmt::Display) -> Error {
    DecodeError::new(DecodeStage::KeyStructure, err.to_string()).into()
}

fn unexpected_label(label: &str, expected: &str) -> DecodeError {
    DecodeError::new(
        DecodeStage::Pem,
        format!("unexpected PEM label '{label}' for {expected}"),
    )
}
