//! Signature algorithms and the policy restricting them

mod rsa;

pub(crate) use self::rsa::{RsaSigner, RsaVerifier};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

/// Algorithm identifier from JWT header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmType {
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,
}

impl AlgorithmType {
    /// Parse the `alg` header value; unknown names (including `none`) yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RS256" => Some(AlgorithmType::RS256),
            "RS384" => Some(AlgorithmType::RS384),
            "RS512" => Some(AlgorithmType::RS512),
            _ => None,
        }
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmType::RS256 => "RS256",
            AlgorithmType::RS384 => "RS384",
            AlgorithmType::RS512 => "RS512",
        }
    }
}

impl std::fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Policy for allowed algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmPolicy {
    allowed: Vec<AlgorithmType>,
}

impl AlgorithmPolicy {
    /// Policy that allows only RS256
    pub fn rs256_only() -> Self {
        Self::allow_only(vec![AlgorithmType::RS256])
    }

    /// Policy that allows all RSA algorithms (RS256, RS384, RS512)
    pub fn rsa_all() -> Self {
        Self::allow_only(vec![
            AlgorithmType::RS256,
            AlgorithmType::RS384,
            AlgorithmType::RS512,
        ])
    }

    /// Create a policy that allows only specific algorithms
    pub fn allow_only(algorithms: Vec<AlgorithmType>) -> Self {
        let mut allowed = Vec::with_capacity(algorithms.len());
        for algorithm in algorithms {
            if !allowed.contains(&algorithm) {
                allowed.push(algorithm);
            }
        }
        Self { allowed }
    }

    /// Build a policy from algorithm names, as found in configuration files
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let algorithms = names
            .iter()
            .map(|name| {
                AlgorithmType::parse(name.as_ref()).ok_or_else(|| {
                    Error::config(format!("unsupported algorithm '{}'", name.as_ref()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::allow_only(algorithms))
    }

    /// Algorithms permitted by this policy
    pub fn allowed(&self) -> &[AlgorithmType] {
        &self.allowed
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Resolve a header `alg` value against the policy
    pub(crate) fn resolve(&self, alg: &str) -> Result<AlgorithmType> {
        match AlgorithmType::parse(alg) {
            Some(algorithm) if self.allowed.contains(&algorithm) => Ok(algorithm),
            _ => Err(Error::AlgorithmMismatch {
                found: Self::printable(alg),
                allowed: self.allowed.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    /// Bound attacker-controlled text before it lands in an error message
    fn printable(alg: &str) -> String {
        if alg.len() <= MAX_ALG_LENGTH {
            return alg.to_string();
        }
        let mut end = MAX_ALG_LENGTH;
        while !alg.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &alg[..end])
    }
}

impl Default for AlgorithmPolicy {
    fn default() -> Self {
        Self::rs256_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parse() {
        assert_eq!(AlgorithmType::parse("RS256"), Some(AlgorithmType::RS256));
        assert_eq!(AlgorithmType::parse("RS384"), Some(AlgorithmType::RS384));
        assert_eq!(AlgorithmType::parse("RS512"), Some(AlgorithmType::RS512));

        assert_eq!(AlgorithmType::parse("none"), None);
        assert_eq!(AlgorithmType::parse("HS256"), None);
        assert_eq!(AlgorithmType::parse("rs256"), None);
        assert_eq!(AlgorithmType::parse(""), None);
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(format!("{}", AlgorithmType::RS256), "RS256");
        assert_eq!(AlgorithmType::RS512.as_str(), "RS512");
    }

    #[test]
    fn test_default_policy_is_rs256_only() {
        let policy = AlgorithmPolicy::default();
        assert_eq!(policy.allowed(), &[AlgorithmType::RS256]);
        assert_eq!(policy.resolve("RS256").unwrap(), AlgorithmType::RS256);

        match policy.resolve("RS384") {
            Err(Error::AlgorithmMismatch { found, allowed }) => {
                assert_eq!(found, "RS384");
                assert_eq!(allowed, vec!["RS256".to_string()]);
            }
            other => panic!("expected AlgorithmMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_none_and_hmac() {
        let policy = AlgorithmPolicy::rsa_all();
        assert!(matches!(
            policy.resolve("none"),
            Err(Error::AlgorithmMismatch { .. })
        ));
        assert!(matches!(
            policy.resolve("HS256"),
            Err(Error::AlgorithmMismatch { .. })
        ));
    }

    #[test]
    fn test_resolve_truncates_long_names() {
        let long = "X".repeat(500);
        match AlgorithmPolicy::default().resolve(&long) {
            Err(Error::AlgorithmMismatch { found, .. }) => {
                assert_eq!(found.len(), MAX_ALG_LENGTH + 3);
            }
            other => panic!("expected AlgorithmMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_allow_only_deduplicates() {
        let policy = AlgorithmPolicy::allow_only(vec![
            AlgorithmType::RS256,
            AlgorithmType::RS256,
            AlgorithmType::RS512,
        ]);
        assert_eq!(policy.allowed(), &[AlgorithmType::RS256, AlgorithmType::RS512]);
    }

    #[test]
    fn test_from_names() {
        let policy = AlgorithmPolicy::from_names(&["RS256", "RS384"]).unwrap();
        assert_eq!(policy.allowed(), &[AlgorithmType::RS256, AlgorithmType::RS384]);

        assert!(matches!(
            AlgorithmPolicy::from_names(&["HS256"]),
            Err(Error::Config(_))
        ));
        assert!(AlgorithmPolicy::from_names::<&str>(&[]).unwrap().is_empty());
    }
}
