use crate::error::{Error, Result};
use crate::utils::bounds::apply_clock_skew;
use serde::{Deserialize, Deserializer};

/// Audience (aud) as it appears in a received token
///
/// RFC 7519 allows either a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    /// Whether the audience names `expected`
    pub fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::Single(aud) => aud == expected,
            Audience::Multiple(auds) => auds.iter().any(|aud| aud == expected),
        }
    }
}

/// Registered claims read from a received token
///
/// Deserialization is strict about types: a string where a number is expected
/// fails, and so does the whole token. `exp` and `nbf` are NumericDate values
/// and may carry a fractional part.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RegisteredClaims {
    #[serde(rename = "iss")]
    pub issuer: Option<String>,

    #[serde(rename = "sub")]
    pub subject: Option<String>,

    #[serde(rename = "aud")]
    pub audience: Option<Audience>,

    #[serde(rename = "exp", default, deserialize_with = "numeric_date")]
    pub expiration: Option<i64>,

    #[serde(rename = "nbf", default, deserialize_with = "numeric_date")]
    pub not_before: Option<i64>,
}

/// Read a NumericDate, rounding a fractional value up to whole seconds
///
/// With integer `now`, `now < exp` holds exactly when `now < ceil(exp)`, so
/// rounding up keeps both comparisons exact.
fn numeric_date<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(seconds) = number.as_i64() {
        return Ok(Some(seconds));
    }

    // 2^63, the first value past i64::MAX
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    match number.as_f64() {
        Some(seconds) if seconds.is_finite() && seconds >= i64::MIN as f64 && seconds < UPPER => {
            Ok(Some(seconds.ceil() as i64))
        }
        _ => Err(serde::de::Error::custom(format!(
            "NumericDate {number} is out of range"
        ))),
    }
}

/// Trust policy applied to the claims of a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClaimsPolicy {
    pub issuer: String,
    pub audience: String,
    pub clock_skew_seconds: u64,
}

/// Enforce the trust policy at `now`, returning the subject
///
/// Every failure is `InvalidToken`.
pub(crate) fn validate_claims(
    claims: RegisteredClaims,
    policy: &ClaimsPolicy,
    now: i64,
) -> Result<String> {
    if claims.issuer.as_deref() != Some(policy.issuer.as_str()) {
        return Err(Error::InvalidToken);
    }

    match &claims.audience {
        Some(aud) if aud.contains(&policy.audience) => {}
        _ => return Err(Error::InvalidToken),
    }

    let exp = claims.expiration.ok_or(Error::InvalidToken)?;
    let exp_with_skew = apply_clock_skew(exp, policy.clock_skew_seconds, true)?;
    if now >= exp_with_skew {
        return Err(Error::InvalidToken);
    }

    if let Some(nbf) = claims.not_before {
        let nbf_with_skew = apply_clock_skew(nbf, policy.clock_skew_seconds, false)?;
        if now < nbf_with_skew {
            return Err(Error::InvalidToken);
        }
    }

    match claims.subject {
        Some(sub) if !sub.is_empty() => Ok(sub),
        _ => Err(Error::InvalidToken),
    }
}
