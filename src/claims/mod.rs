//! Claim sets for issuance and the typed views used to check them
//!
//! A [`ClaimSet`] is the open JSON object a caller hands to the
//! [`Issuer`](crate::Issuer). [`RequiredClaims`] is the typed view of the five
//! claims every issued token must carry; converting into it is the
//! completeness check, and it never coerces between JSON types.

mod validator;

pub use validator::Audience;
pub(crate) use validator::{ClaimsPolicy, RegisteredClaims, validate_claims};

use crate::error::{ClaimError, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim name for the issuer
pub const ISSUER: &str = "iss";
/// Claim name for the audience
pub const AUDIENCE: &str = "aud";
/// Claim name for the issued-at time
pub const ISSUED_AT: &str = "iat";
/// Claim name for the expiration time
pub const EXPIRATION: &str = "exp";
/// Claim name for the subject
pub const SUBJECT: &str = "sub";
/// Claim name for the not-before time
pub const NOT_BEFORE: &str = "nbf";

/// Open mapping from claim name to JSON value
///
/// Any JSON value is accepted here; the five required claims are checked when
/// the set is issued. Everything else is passed through into the token as is.
///
/// ```
/// use rsajwt::ClaimSet;
/// use serde_json::json;
///
/// let claims = ClaimSet::new()
///     .with("iss", "svc-a")
///     .with("aud", json!(["svc-b"]))
///     .with("sub", "user-1")
///     .with("iat", 1_700_000_000)
///     .with("exp", 1_700_003_600)
///     .with("scope", "read");
///
/// assert_eq!(claims.required().unwrap().subject, "user-1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim, consuming and returning the set
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a claim, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.claims.insert(name.into(), value.into())
    }

    /// Remove a claim
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.claims.remove(name)
    }

    /// Look up a claim by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Whether a claim with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate over claims in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.claims.iter()
    }

    /// Run the completeness check, yielding the typed required claims
    pub fn required(&self) -> std::result::Result<RequiredClaims, ClaimError> {
        RequiredClaims::try_from(self)
    }

    /// Claims that are not among the five required ones
    pub fn extra(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.claims
            .iter()
            .filter(|(name, _)| !RequiredClaims::NAMES.contains(&name.as_str()))
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.claims).map_err(|e| Error::Signing(e.to_string()))
    }
}

impl From<Map<String, Value>> for ClaimSet {
    fn from(claims: Map<String, Value>) -> Self {
        Self { claims }
    }
}

impl TryFrom<Value> for ClaimSet {
    type Error = Error;

    /// Only a JSON object is a claim set
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(claims) => Ok(Self { claims }),
            _ => Err(Error::config("claim set must be a JSON object")),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            claims: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// The five claims every issued token must carry, strictly typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredClaims {
    /// Issuer (iss), non-empty
    pub issuer: String,
    /// Audience (aud), non-empty list of non-empty strings
    pub audience: Vec<String>,
    /// Issued At (iat), non-zero seconds since Unix epoch
    pub issued_at: i64,
    /// Expiration Time (exp), non-zero seconds since Unix epoch
    pub expiration: i64,
    /// Subject (sub), non-empty
    pub subject: String,
}

impl RequiredClaims {
    /// Claim names in the order they are checked
    pub const NAMES: [&'static str; 5] = [ISSUER, AUDIENCE, ISSUED_AT, EXPIRATION, SUBJECT];
}

impl TryFrom<&ClaimSet> for RequiredClaims {
    type Error = ClaimError;

    fn try_from(claims: &ClaimSet) -> std::result::Result<Self, ClaimError> {
        let issuer = required_string(claims, ISSUER)?;
        let audience = required_audience(claims)?;
        let issued_at = required_timestamp(claims, ISSUED_AT)?;
        let expiration = required_timestamp(claims, EXPIRATION)?;
        let subject = required_string(claims, SUBJECT)?;

        Ok(Self {
            issuer,
            audience,
            issued_at,
            expiration,
            subject,
        })
    }
}

fn lookup<'a>(
    claims: &'a ClaimSet,
    name: &'static str,
) -> std::result::Result<&'a Value, ClaimError> {
    claims.get(name).ok_or_else(|| ClaimError::missing(name))
}

fn required_string(
    claims: &ClaimSet,
    name: &'static str,
) -> std::result::Result<String, ClaimError> {
    match lookup(claims, name)? {
        Value::String(s) if s.is_empty() => Err(ClaimError::empty(name)),
        Value::String(s) => Ok(s.clone()),
        _ => Err(ClaimError::wrong_type(name, "a string")),
    }
}

fn required_audience(claims: &ClaimSet) -> std::result::Result<Vec<String>, ClaimError> {
    const EXPECTED: &str = "an array of strings";

    let Value::Array(values) = lookup(claims, AUDIENCE)? else {
        return Err(ClaimError::wrong_type(AUDIENCE, EXPECTED));
    };
    if values.is_empty() {
        return Err(ClaimError::empty(AUDIENCE));
    }

    values
        .iter()
        .map(|value| match value {
            Value::String(s) if s.is_empty() => Err(ClaimError::empty(AUDIENCE)),
            Value::String(s) => Ok(s.clone()),
            _ => Err(ClaimError::wrong_type(AUDIENCE, EXPECTED)),
        })
        .collect()
}

fn required_timestamp(
    claims: &ClaimSet,
    name: &'static str,
) -> std::result::Result<i64, ClaimError> {
    // Floats and integers outside i64 are both rejected
    let timestamp = match lookup(claims, name)? {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
    .ok_or_else(|| ClaimError::wrong_type(name, "an integer"))?;

    if timestamp == 0 {
        return Err(ClaimError::empty(name));
    }
    Ok(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClaimErrorKind;
    use serde_json::json;

    fn complete() -> ClaimSet {
        ClaimSet::try_from(json!({
            "iss": "svc-a",
            "aud": ["svc-b"],
            "iat": 1_700_000_000,
            "exp": 1_700_003_600,
            "sub": "user-1",
        }))
        .unwrap()
    }

    fn rejection(claims: &ClaimSet) -> (&'static str, ClaimErrorKind) {
        let err = claims.required().unwrap_err();
        (err.claim(), err.kind().clone())
    }

    #[test]
    fn test_complete_claims() {
        let required = complete().required().unwrap();
        assert_eq!(required.issuer, "svc-a");
        assert_eq!(required.audience, vec!["svc-b".to_string()]);
        assert_eq!(required.issued_at, 1_700_000_000);
        assert_eq!(required.expiration, 1_700_003_600);
        assert_eq!(required.subject, "user-1");
    }

    #[test]
    fn test_each_missing_claim_is_named() {
        for name in RequiredClaims::NAMES {
            let mut claims = complete();
            claims.remove(name);
            assert_eq!(rejection(&claims), (name, ClaimErrorKind::Missing));
        }
    }

    #[test]
    fn test_each_empty_claim_is_named() {
        let empties = [
            (ISSUER, json!("")),
            (AUDIENCE, json!([])),
            (ISSUED_AT, json!(0)),
            (EXPIRATION, json!(0)),
            (SUBJECT, json!("")),
        ];
        for (name, value) in empties {
            let claims = complete().with(name, value);
            assert_eq!(rejection(&claims), (name, ClaimErrorKind::Empty));
        }
    }

    #[test]
    fn test_check_order() {
        // Everything missing: iss is reported first
        assert_eq!(rejection(&ClaimSet::new()).0, ISSUER);

        let claims = ClaimSet::new().with("iss", "svc-a").with("aud", json!(["svc-b"]));
        assert_eq!(rejection(&claims), (ISSUED_AT, ClaimErrorKind::Missing));
    }

    #[test]
    fn test_timestamps_must_be_integers() {
        for value in [json!(1_700_000_000.5), json!(1.0), json!("1700000000"), json!(null)] {
            let claims = complete().with(EXPIRATION, value.clone());
            assert_eq!(
                rejection(&claims),
                (
                    EXPIRATION,
                    ClaimErrorKind::WrongType {
                        expected: "an integer"
                    }
                ),
                "{value}"
            );

            let claims = complete().with(ISSUED_AT, value);
            assert_eq!(rejection(&claims).0, ISSUED_AT);
        }
    }

    #[test]
    fn test_timestamp_beyond_i64_is_wrong_type() {
        let claims = complete().with(EXPIRATION, u64::MAX);
        assert!(matches!(
            rejection(&claims),
            (EXPIRATION, ClaimErrorKind::WrongType { .. })
        ));
    }

    #[test]
    fn test_audience_shapes() {
        let claims = complete().with(AUDIENCE, "svc-b");
        assert!(matches!(
            rejection(&claims),
            (AUDIENCE, ClaimErrorKind::WrongType { .. })
        ));

        let claims = complete().with(AUDIENCE, json!(["svc-b", ""]));
        assert_eq!(rejection(&claims), (AUDIENCE, ClaimErrorKind::Empty));

        let claims = complete().with(AUDIENCE, json!(["svc-b", 7]));
        assert!(matches!(
            rejection(&claims),
            (AUDIENCE, ClaimErrorKind::WrongType { .. })
        ));

        let claims = complete().with(AUDIENCE, json!(["svc-b", "svc-c"]));
        assert_eq!(claims.required().unwrap().audience.len(), 2);
    }

    #[test]
    fn test_strings_must_be_strings() {
        let claims = complete().with(SUBJECT, 42);
        assert_eq!(
            rejection(&claims),
            (
                SUBJECT,
                ClaimErrorKind::WrongType {
                    expected: "a string"
                }
            )
        );
    }

    #[test]
    fn test_extra_claims_pass_through() {
        let claims = complete().with("scope", "read").with("roles", json!(["admin"]));
        let extra: Vec<&str> = claims.extra().map(|(name, _)| name.as_str()).collect();
        assert_eq!(extra, vec!["roles", "scope"]);

        let json: Value = serde_json::from_str(&claims.to_json().unwrap()).unwrap();
        assert_eq!(json["scope"], "read");
        assert_eq!(json["roles"], json!(["admin"]));
    }

    #[test]
    fn test_try_from_non_object() {
        assert!(matches!(
            ClaimSet::try_from(json!(["iss"])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_iterator() {
        let claims: ClaimSet = [("iss", "svc-a"), ("sub", "user-1")].into_iter().collect();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims.get("iss"), Some(&json!("svc-a")));
    }
}
