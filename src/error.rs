//! Errors for rsajwt

use thiserror::Error;

/// rsajwt Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid configuration: {0}")]
    Config(String),

    // ============================================================================
    // Key Material Errors
    // ============================================================================
    #[error("Key decoding failed: {0}")]
    Decode(DecodeError),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    // ============================================================================
    // Issuance Errors
    // ============================================================================
    #[error("Claim set rejected: {0}")]
    Claim(ClaimError),

    #[error("Token signing failed: {0}")]
    Signing(String),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    AlgorithmMismatch { found: String, allowed: Vec<String> },

    /// Signature, structure and policy failures are deliberately folded together
    #[error("Token is not valid")]
    InvalidToken,
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Error::Decode(err)
    }
}

impl From<ClaimError> for Error {
    fn from(err: ClaimError) -> Self {
        Error::Claim(err)
    }
}

/// Layer of a key text at which decoding failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// Outer base64 wrapping
    Base64,
    /// PEM armor (boundaries, label, body)
    Pem,
    /// DER key structure inside a valid PEM block
    KeyStructure,
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self {
            DecodeStage::Base64 => "base64",
            DecodeStage::Pem => "pem",
            DecodeStage::KeyStructure => "key structure",
        };
        f.write_str(stage)
    }
}

/// Failure to decode key text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} stage: {reason}")]
pub struct DecodeError {
    stage: DecodeStage,
    reason: String,
}

impl DecodeError {
    pub(crate) fn new(stage: DecodeStage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }

    /// Stage at which decoding failed
    pub fn stage(&self) -> DecodeStage {
        self.stage
    }

    /// Human-readable reason
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Why a required claim was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimErrorKind {
    Missing,
    WrongType { expected: &'static str },
    Empty,
}

/// A required claim failed the completeness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimError {
    claim: &'static str,
    kind: ClaimErrorKind,
}

impl ClaimError {
    pub(crate) fn missing(claim: &'static str) -> Self {
        Self {
            claim,
            kind: ClaimErrorKind::Missing,
        }
    }

    pub(crate) fn wrong_type(claim: &'static str, expected: &'static str) -> Self {
        Self {
            claim,
            kind: ClaimErrorKind::WrongType { expected },
        }
    }

    pub(crate) fn empty(claim: &'static str) -> Self {
        Self {
            claim,
            kind: ClaimErrorKind::Empty,
        }
    }

    /// Name of the offending claim (e.g. `"aud"`)
    pub fn claim(&self) -> &'static str {
        self.claim
    }

    /// What was wrong with it
    pub fn kind(&self) -> &ClaimErrorKind {
        &self.kind
    }
}

impl std::fmt::Display for ClaimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ClaimErrorKind::Missing => write!(f, "required claim '{}' is missing", self.claim),
            ClaimErrorKind::WrongType { expected } => {
                write!(f, "claim '{}' must be {expected}", self.claim)
            }
            ClaimErrorKind::Empty => write!(f, "claim '{}' must not be empty", self.claim),
        }
    }
}

impl std::error::Error for ClaimError {}

/// Result type alias for rsajwt operations
pub type Result<T> = std::result::Result<T, Error>;
