//! Serde-loadable configuration for [`Issuer`](crate::Issuer) and [`Validator`](crate::Validator)
//!
//! Where the values come from (files, environment, secret stores) is up to the
//! caller; these types only describe their shape.

use serde::{Deserialize, Serialize};

fn default_algorithms() -> Vec<String> {
    vec!["RS256".to_string()]
}

/// Configuration for an [`Issuer`](crate::Issuer)
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerConfig {
    /// Private key text: PKCS#1 or PKCS#8 PEM, raw or base64-wrapped
    pub private_key: String,
}

impl std::fmt::Debug for IssuerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuerConfig")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Configuration for a [`Validator`](crate::Validator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Public key text: SPKI or PKCS#1 PEM, raw or base64-wrapped
    pub public_key: String,

    /// Expected `iss`
    pub issuer: String,

    /// Audience that must appear in `aud`
    pub audience: String,

    /// Permitted `alg` values
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<String>,

    /// Tolerance applied to `exp` and `nbf` (at most 300)
    #[serde(default)]
    pub clock_skew_seconds: u64,
}

impl ValidatorConfig {
    pub fn new(
        public_key: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            algorithms: default_algorithms(),
            clock_skew_seconds: 0,
        }
    }
}
