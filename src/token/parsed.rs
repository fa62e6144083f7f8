use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::token::TokenHeader;
use crate::utils::base64url;
use serde::de::DeserializeOwned;

/// A compact JWS split into its parts, header decoded, nothing verified yet
///
/// The payload stays encoded until the caller has checked the signature.
#[derive(Debug)]
pub(crate) struct ParsedToken<'a> {
    header: TokenHeader,
    header_b64: &'a str,
    payload_b64: &'a str,
    signature_b64: &'a str,
}

impl<'a> ParsedToken<'a> {
    /// Split and bound-check a token, decoding its header
    ///
    /// Every structural failure is `InvalidToken`.
    pub fn parse(token: &'a str) -> Result<Self> {
        if token.is_empty() || token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::InvalidToken);
        }

        let mut parts = token.split('.');
        let header_b64 = parts.next().ok_or(Error::InvalidToken)?;
        let payload_b64 = parts.next().ok_or(Error::InvalidToken)?;
        let signature_b64 = parts.next().ok_or(Error::InvalidToken)?;
        if parts.next().is_some() {
            return Err(Error::InvalidToken);
        }

        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::InvalidToken);
        }

        let header_json = base64url::decode_bytes(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let header: TokenHeader =
            serde_json::from_slice(&header_json).map_err(|_| Error::InvalidToken)?;

        Ok(Self {
            header,
            header_b64,
            payload_b64,
            signature_b64,
        })
    }

    /// Declared signing algorithm, unchecked
    pub fn algorithm(&self) -> &str {
        &self.header.algorithm
    }

    /// The bytes covered by the signature (`header.payload`)
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header_b64, self.payload_b64)
    }

    pub fn signature(&self) -> &'a str {
        self.signature_b64
    }

    /// Decode the payload into `T`; only call after signature verification
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T> {
        let payload_json = base64url::decode_bytes(self.payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        serde_json::from_slice(&payload_json).map_err(|_| Error::InvalidToken)
    }
}
