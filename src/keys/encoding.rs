//! Durable text encodings for key material
//!
//! Two conventions exist in deployed configuration: raw PEM text, and PEM text
//! additionally wrapped in standard base64. Output defaults to raw PEM; input is
//! always detected.

use crate::error::{DecodeError, DecodeStage};
use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::pkcs8::der::pem;

const PEM_PREFIX: &str = "-----BEGIN";

/// Text encoding convention for key material
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyEncoding {
    /// Raw PEM text
    #[default]
    Pem,
    /// PEM text wrapped in standard base64 (legacy)
    Base64Pem,
}

impl KeyEncoding {
    /// Detect which convention a key text uses
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with(PEM_PREFIX) {
            KeyEncoding::Pem
        } else {
            KeyEncoding::Base64Pem
        }
    }

    /// Apply this convention to PEM text
    pub(crate) fn wrap(self, pem_text: &str) -> String {
        match self {
            KeyEncoding::Pem => pem_text.to_string(),
            KeyEncoding::Base64Pem => STANDARD.encode(pem_text.as_bytes()),
        }
    }
}

/// Strip the outer convention, yielding PEM text
pub(crate) fn unwrap_pem(text: &str) -> Result<String, DecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::new(DecodeStage::Pem, "key text is empty"));
    }

    match KeyEncoding::detect(trimmed) {
        KeyEncoding::Pem => Ok(trimmed.to_string()),
        KeyEncoding::Base64Pem => {
            let compact: String = trimmed.split_whitespace().collect();
            let bytes = STANDARD
                .decode(compact.as_bytes())
                .map_err(|e| DecodeError::new(DecodeStage::Base64, e.to_string()))?;
            let pem_text = String::from_utf8(bytes)
                .map_err(|_| DecodeError::new(DecodeStage::Base64, "decoded key is not UTF-8"))?;
            Ok(pem_text.trim().to_string())
        }
    }
}

/// Decode a single PEM block, returning its label and DER body
pub(crate) fn decode_pem_block(pem_text: &str) -> Result<(String, Vec<u8>), DecodeError> {
    let (label, der) = pem::decode_vec(pem_text.trim().as_bytes())
        .map_err(|e| DecodeError::new(DecodeStage::Pem, e.to_string()))?;
    Ok((label.to_string(), der))
}
