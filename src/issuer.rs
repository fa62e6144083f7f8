//! Token issuance

use crate::algorithm::{AlgorithmType, RsaSigner};
use crate::claims::ClaimSet;
use crate::config::IssuerConfig;
use crate::error::Result;
use crate::keys::{self, KeyEncoding, PrivateKey};
use crate::token;
use crate::utils::bounds::require_non_empty;
use rsa::traits::PublicKeyParts;
use std::sync::Arc;

/// Signs claim sets with an RSA private key
///
/// Tokens are always RS256. The claim set must carry `iss`, `aud`, `iat`,
/// `exp` and `sub`; see [`RequiredClaims`](crate::RequiredClaims).
#[derive(Clone)]
pub struct Issuer {
    signer: Arc<RsaSigner>,
}

impl Issuer {
    /// Create an issuer from private key text (raw or base64-wrapped PEM)
    pub fn new(private_key: &str) -> Result<Self> {
        require_non_empty("private key", private_key)?;
        let key = keys::parse_private(private_key)?;
        Self::from_key(key)
    }

    /// Create an issuer from a key already in memory
    ///
    /// Keys outside 2048..=4096 bits are rejected with
    /// [`Error::Config`](crate::Error::Config).
    pub fn from_key(key: PrivateKey) -> Result<Self> {
        let bits = key.size() * 8;
        keys::check_key_size(bits)?;
        tracing::debug!(bits, "issuer ready");
        Ok(Self {
            signer: Arc::new(RsaSigner::new(AlgorithmType::RS256, key)),
        })
    }

    pub fn from_config(config: &IssuerConfig) -> Result<Self> {
        Self::new(&config.private_key)
    }

    /// Sign a claim set, returning the compact token
    ///
    /// The required claims are checked before anything is signed; the first
    /// failure is returned as [`Error::Claim`](crate::Error::Claim). All other
    /// claims are carried into the token unchanged.
    pub fn issue(&self, claims: &ClaimSet) -> Result<String> {
        let required = claims.required()?;
        let token = token::encode(claims, &self.signer)?;
        tracing::debug!(
            algorithm = %self.signer.algorithm(),
            issuer = %required.issuer,
            token_len = token.len(),
            "issued token"
        );
        Ok(token)
    }

    /// Public key matching this issuer, for distribution to validators
    pub fn public_key_pem(&self, encoding: KeyEncoding) -> Result<String> {
        keys::derive_public_pem(self.signer.private_key(), encoding)
    }
}

impl std::fmt::Debug for Issuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Issuer")
            .field("bits", &(self.signer.private_key().size() * 8))
            .finish_non_exhaustive()
    }
}
