//! # rsajwt - RS256 identity assertions
//!
//! > Issue and validate RSA-signed JSON Web Tokens with strict claim and trust-policy checks.
//!
//! **rsajwt** covers both ends of service-to-service authentication: an [`Issuer`] that
//! refuses to sign a claim set missing any security-relevant claim, and a [`Validator`] that
//! verifies a received token against a fixed trust policy and hands back the subject.
//!
//! ## Quick Start
//!
//! ```
//! use rsajwt::{ClaimSet, Issuer, KeyEncoding, Validator, keys};
//! use serde_json::json;
//!
//! # fn main() -> rsajwt::Result<()> {
//! let private_key = keys::generate()?;
//! let public_pem = keys::derive_public_pem(&private_key, KeyEncoding::Pem)?;
//!
//! let issuer = Issuer::from_key(private_key)?;
//! let validator = Validator::new(&public_pem, "svc-a", "svc-b")?;
//!
//! let now = 1_700_000_000;
//! let claims = ClaimSet::try_from(json!({
//!     "iss": "svc-a",
//!     "aud": ["svc-b"],
//!     "sub": "user-1",
//!     "iat": now,
//!     "exp": now + 3600,
//! }))?;
//!
//! let token = issuer.issue(&claims)?;
//! assert_eq!(validator.validate_at(&token, now)?, "user-1");
//! # Ok(())
//! # }
//! ```
//!
//! ## Issuance
//!
//! Before anything is signed, `iss`, `aud`, `iat`, `exp` and `sub` are checked in that order.
//! Types are never coerced: `aud` must be an array of non-empty strings, `iat` and `exp` must
//! be non-zero JSON integers. The first failure is returned as [`Error::Claim`], naming the
//! claim. Every other claim passes through into the token untouched.
//!
//! ## Validation Flow
//!
//! ```text
//! token text
//!     │ size limits, three Base64URL parts, JSON header
//!     ▼
//! alg checked against AlgorithmPolicy (default: RS256 only)
//!     │ RSASSA-PKCS1-v1_5 signature verified with the configured public key
//!     ▼
//! iss == expected, aud contains expected, now < exp (+ skew), now >= nbf (- skew)
//!     │ sub non-empty
//!     ▼
//! subject
//! ```
//!
//! A disallowed algorithm is reported as [`Error::AlgorithmMismatch`]. Every other failure is
//! [`Error::InvalidToken`], without detail.
//!
//! ## Key Material
//!
//! The [`keys`] module generates keys and moves them to and from text. Raw PEM is written by
//! default; PEM wrapped in standard base64 can still be produced with
//! [`KeyEncoding::Base64Pem`] and is always accepted when parsing.

mod error;

pub mod claims;
pub mod config;
pub mod keys;

// Internal modules
pub(crate) mod algorithm;
pub(crate) mod issuer;
pub(crate) mod limits;
pub(crate) mod token;
pub(crate) mod utils;
pub(crate) mod validator;

// Public Interface
pub use algorithm::{AlgorithmPolicy, AlgorithmType};
pub use claims::{Audience, ClaimSet, RequiredClaims};
pub use config::{IssuerConfig, ValidatorConfig};
pub use error::{ClaimError, ClaimErrorKind, DecodeError, DecodeStage, Error, Result};
pub use issuer::Issuer;
pub use keys::{KeyEncoding, PrivateKey, PublicKey};
pub use validator::{Validator, ValidatorBuilder};
