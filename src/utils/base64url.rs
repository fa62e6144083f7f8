//! Base64URL encoding/decoding per RFC 4648
//!
//! This module provides a thin wrapper around the `base64` crate with
//! size limit validation for security.

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes to an unpadded Base64URL string
pub(crate) fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode Base64URL string to bytes with maximum size limit
///
/// Every failure is reported as `InvalidToken`; callers only decode token segments.
pub(crate) fn decode_bytes(input: &str, max_size: usize) -> Result<Vec<u8>> {
    // Reject before decoding: 4 Base64URL chars carry 3 bytes
    if input.len() / 4 * 3 > max_size {
        return Err(Error::InvalidToken);
    }

    let result = URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|_| Error::InvalidToken)?;

    if result.len() > max_size {
        return Err(Error::InvalidToken);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_invalid() {
        assert!(decode_bytes("!!!", 1000).is_err());
        // Standard base64 with padding must fail for URL_SAFE_NO_PAD
        assert!(decode_bytes("SGVsbG8=", 1000).is_err());
    }

    #[test]
    fn test_decode_valid() {
        let result = decode_bytes("SGVsbG8", 1000).unwrap();
        assert_eq!(result, b"Hello");
    }

    #[test]
    fn test_decode_with_limit() {
        assert_eq!(decode_bytes("SGVsbG8", 10).unwrap(), b"Hello");
        assert!(decode_bytes("SGVsbG8", 3).is_err());
    }

    #[test]
    fn test_encode_url_safe() {
        let encoded = encode_bytes(&[0xfb, 0xff]);
        assert_eq!(encoded, "-_8");
        assert_eq!(decode_bytes(&encoded, 10).unwrap(), vec![0xfb, 0xff]);
    }
}
