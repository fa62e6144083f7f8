//! Compact JWS serialization: `header.payload.signature`, each Base64URL without padding

mod header;
mod parsed;

pub(crate) use header::TokenHeader;
pub(crate) use parsed::ParsedToken;

use crate::algorithm::RsaSigner;
use crate::claims::ClaimSet;
use crate::error::{Error, Result};
use crate::utils::base64url;

/// Serialize and sign a claim set
pub(crate) fn encode(claims: &ClaimSet, signer: &RsaSigner) -> Result<String> {
    let header_json = serde_json::to_vec(&TokenHeader::for_algorithm(signer.algorithm()))
        .map_err(|e| Error::Signing(e.to_string()))?;
    let payload_json = claims.to_json()?;

    let signing_input = format!(
        "{}.{}",
        base64url::encode_bytes(&header_json),
        base64url::encode_bytes(payload_json.as_bytes())
    );
    let signature = signer.sign(&signing_input)?;

    Ok(format!(
        "{signing_input}.{}",
        base64url::encode_bytes(&signature)
    ))
}
