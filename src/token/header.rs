use crate::algorithm::AlgorithmType;
use serde::{Deserialize, Serialize};

const JWT_TYPE: &str = "JWT";

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TokenHeader {
    /// Algorithm used for signing
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Token type (typically "JWT")
    #[serde(rename = "typ", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl TokenHeader {
    /// Header written into every issued token
    pub fn for_algorithm(algorithm: AlgorithmType) -> Self {
        Self {
            algorithm: algorithm.as_str().to_string(),
            token_type: Some(JWT_TYPE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_header_json() {
        let header = TokenHeader::for_algorithm(AlgorithmType::RS256);
        assert_eq!(
            serde_json::to_string(&header).unwrap(),
            r#"{"alg":"RS256","typ":"JWT"}"#
        );
    }

    #[test]
    fn test_header_without_type() {
        let header: TokenHeader = serde_json::from_str(r#"{"alg":"RS384"}"#).unwrap();
        assert_eq!(header.algorithm, "RS384");
        assert_eq!(header.token_type, None);
    }

    #[test]
    fn test_header_requires_string_alg() {
        assert!(serde_json::from_str::<TokenHeader>(r#"{"typ":"JWT"}"#).is_err());
        assert!(serde_json::from_str::<TokenHeader>(r#"{"alg":256}"#).is_err());
    }
}
