use crate::algorithm::AlgorithmType;
use crate::error::{Error, Result};
use crate::limits::MAX_DECODED_SIGNATURE_SIZE;
use crate::utils::base64url;

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

/// Private key prepared for RSASSA-PKCS1-v1_5 signing under one algorithm
#[derive(Clone)]
pub(crate) enum RsaSigner {
    RS256(SigningKey<Sha256>),
    RS384(SigningKey<Sha384>),
    RS512(SigningKey<Sha512>),
}

impl RsaSigner {
    pub fn new(algorithm: AlgorithmType, key: RsaPrivateKey) -> Self {
        match algorithm {
            AlgorithmType::RS256 => RsaSigner::RS256(SigningKey::new(key)),
            AlgorithmType::RS384 => RsaSigner::RS384(SigningKey::new(key)),
            AlgorithmType::RS512 => RsaSigner::RS512(SigningKey::new(key)),
        }
    }

    pub fn algorithm(&self) -> AlgorithmType {
        match self {
            RsaSigner::RS256(_) => AlgorithmType::RS256,
            RsaSigner::RS384(_) => AlgorithmType::RS384,
            RsaSigner::RS512(_) => AlgorithmType::RS512,
        }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        match self {
            RsaSigner::RS256(key) => key.as_ref(),
            RsaSigner::RS384(key) => key.as_ref(),
            RsaSigner::RS512(key) => key.as_ref(),
        }
    }

    /// Sign the JWS signing input (`header.payload`), returning raw signature bytes
    pub fn sign(&self, signing_input: &str) -> Result<Vec<u8>> {
        match self {
            RsaSigner::RS256(key) => sign_with(key, signing_input),
            RsaSigner::RS384(key) => sign_with(key, signing_input),
            RsaSigner::RS512(key) => sign_with(key, signing_input),
        }
    }
}

impl std::fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSigner")
            .field("algorithm", &self.algorithm())
            .field("bits", &(self.private_key().size() * 8))
            .finish_non_exhaustive()
    }
}

fn sign_with<S>(key: &S, signing_input: &str) -> Result<Vec<u8>>
where
    S: RandomizedSigner<Signature>,
{
    // The RNG only blinds the private-key operation; PKCS#1 v1.5 output is deterministic
    let signature = key
        .try_sign_with_rng(&mut rand::thread_rng(), signing_input.as_bytes())
        .map_err(|e| Error::Signing(e.to_string()))?;
    Ok(signature.to_vec())
}

/// Public key prepared for verification under every RSA algorithm
#[derive(Clone)]
pub(crate) struct RsaVerifier {
    rs256: VerifyingKey<Sha256>,
    rs384: VerifyingKey<Sha384>,
    rs512: VerifyingKey<Sha512>,
}

impl RsaVerifier {
    pub fn new(key: RsaPublicKey) -> Self {
        Self {
            rs256: VerifyingKey::new(key.clone()),
            rs384: VerifyingKey::new(key.clone()),
            rs512: VerifyingKey::new(key),
        }
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        self.rs256.as_ref()
    }

    /// Verify a Base64URL-encoded signature over the signing input
    ///
    /// Any failure, including a malformed signature segment, is `InvalidToken`.
    pub fn verify(
        &self,
        algorithm: AlgorithmType,
        signing_input: &str,
        signature: &str,
    ) -> Result<()> {
        let signature_bytes = base64url::decode_bytes(signature, MAX_DECODED_SIGNATURE_SIZE)?;
        let signature =
            Signature::try_from(signature_bytes.as_slice()).map_err(|_| Error::InvalidToken)?;

        let message = signing_input.as_bytes();
        match algorithm {
            AlgorithmType::RS256 => self.rs256.verify(message, &signature),
            AlgorithmType::RS384 => self.rs384.verify(message, &signature),
            AlgorithmType::RS512 => self.rs512.verify(message, &signature),
        }
        .map_err(|_| Error::InvalidToken)
    }
}

impl std::fmt::Debug for RsaVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaVerifier")
            .field("bits", &(self.public_key().size() * 8))
            .finish()
    }
}
