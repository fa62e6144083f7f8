//! Token validation against a fixed trust policy
//!
//! A [`Validator`] is configured once and reused for every token. Checks run in
//! a fixed order: structure, algorithm policy, signature, then claims. Nothing
//! from the payload is trusted until the signature has verified.

use crate::algorithm::{AlgorithmPolicy, RsaVerifier};
use crate::claims::{ClaimsPolicy, RegisteredClaims, validate_claims};
use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::keys;
use crate::token::ParsedToken;
use crate::utils::bounds::{require_non_empty, validate_clock_skew};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Verifies tokens and extracts their subject
#[derive(Debug, Clone)]
pub struct Validator {
    verifier: Arc<RsaVerifier>,
    algorithms: AlgorithmPolicy,
    claims: ClaimsPolicy,
}

/// Builder for [`Validator`]
///
/// Defaults: RS256 only, no clock skew.
#[derive(Debug, Clone)]
pub struct ValidatorBuilder {
    public_key: String,
    issuer: String,
    audience: String,
    algorithms: AlgorithmPolicy,
    clock_skew_seconds: u64,
}

impl ValidatorBuilder {
    /// Configure the algorithm policy
    pub fn algorithms(mut self, policy: AlgorithmPolicy) -> Self {
        self.algorithms = policy;
        self
    }

    /// Set clock skew tolerance for `exp` and `nbf`
    ///
    /// # Security
    /// Values above 300 seconds are rejected by [`build`](Self::build).
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// Check the configuration and parse the public key
    pub fn build(self) -> Result<Validator> {
        require_non_empty("public key", &self.public_key)?;
        require_non_empty("issuer", &self.issuer)?;
        require_non_empty("audience", &self.audience)?;
        validate_clock_skew(self.clock_skew_seconds)?;
        if self.algorithms.is_empty() {
            return Err(Error::config("algorithm policy permits nothing"));
        }

        let key = keys::parse_public(&self.public_key)?;

        tracing::debug!(
            issuer = %self.issuer,
            audience = %self.audience,
            algorithms = ?self.algorithms.allowed(),
            clock_skew_seconds = self.clock_skew_seconds,
            "validator ready"
        );

        Ok(Validator {
            verifier: Arc::new(RsaVerifier::new(key)),
            algorithms: self.algorithms,
            claims: ClaimsPolicy {
                issuer: self.issuer,
                audience: self.audience,
                clock_skew_seconds: self.clock_skew_seconds,
            },
        })
    }
}

impl Validator {
    /// Create a validator with the default policy (RS256 only, no clock skew)
    ///
    /// Empty inputs are rejected with [`Error::Config`], checked in argument
    /// order; an unreadable key is [`Error::Decode`].
    pub fn new(public_key: &str, trusted_issuer: &str, audience: &str) -> Result<Self> {
        Self::builder(public_key, trusted_issuer, audience).build()
    }

    /// Start configuring a validator
    pub fn builder(
        public_key: impl Into<String>,
        trusted_issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> ValidatorBuilder {
        ValidatorBuilder {
            public_key: public_key.into(),
            issuer: trusted_issuer.into(),
            audience: audience.into(),
            algorithms: AlgorithmPolicy::default(),
            clock_skew_seconds: 0,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        Self::builder(
            config.public_key.as_str(),
            config.issuer.as_str(),
            config.audience.as_str(),
        )
        .algorithms(AlgorithmPolicy::from_names(&config.algorithms)?)
        .clock_skew(config.clock_skew_seconds)
        .build()
    }

    /// Validate a token at the current system time, returning its subject
    pub fn validate(&self, token: &str) -> Result<String> {
        self.validate_at(token, current_timestamp())
    }

    /// Validate a token at `now` (seconds since Unix epoch), returning its subject
    ///
    /// A disallowed `alg` is [`Error::AlgorithmMismatch`]; every other
    /// failure is [`Error::InvalidToken`].
    pub fn validate_at(&self, token: &str, now: i64) -> Result<String> {
        // 1. Structure and header
        let parsed = ParsedToken::parse(token)?;

        // 2. Algorithm policy (always enforced - default is RS256-only)
        let algorithm = self.algorithms.resolve(parsed.algorithm())?;

        // 3. Signature
        self.verifier
            .verify(algorithm, &parsed.signing_input(), parsed.signature())?;

        // 4. Claims
        let claims: RegisteredClaims = parsed.decode_payload()?;
        let subject = validate_claims(claims, &self.claims, now)?;

        tracing::trace!(%algorithm, subject = %subject, "token accepted");
        Ok(subject)
    }

    pub fn issuer(&self) -> &str {
        &self.claims.issuer
    }

    pub fn audience(&self) -> &str {
        &self.claims.audience
    }

    pub fn algorithms(&self) -> &AlgorithmPolicy {
        &self.algorithms
    }
}

/// Get current Unix timestamp
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}
