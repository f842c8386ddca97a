//! Token parsing and verification
//!
//! Checks run in a fixed order and the first failure is returned:
//! structure, header decoding, header content, signature, claims decoding,
//! then expiration. Claims are never interpreted before the signature over
//! the raw `header.claims` text has been verified, and the MAC is always
//! HMAC-SHA256 whatever the header declares.

use crate::codec::decode_segment;
use crate::error::{Segment, TokenError, TokenResult};
use crate::mac;
use crate::types::{ALGORITHM, Claims, Header, TOKEN_TYPE, split_segments};
use crate::validation::Validation;

/// Parse and verify an HS256 token with default [`Validation`]
///
/// # Errors
/// Returns the `TokenError` of the first check the token fails.
pub fn parse(token: &str, secret: &[u8]) -> TokenResult<Claims> {
    parse_with(token, secret, &Validation::default())
}

/// Parse and verify an HS256 token with caller-supplied options
///
/// # Errors
/// Returns the `TokenError` of the first check the token fails.
pub fn parse_with(token: &str, secret: &[u8], validation: &Validation) -> TokenResult<Claims> {
    verify(token, secret, validation).inspect_err(|e| {
        tracing::debug!(kind = ?e.kind(), error = %e, "rejected HS256 token");
    })
}

fn verify(token: &str, secret: &[u8], validation: &Validation) -> TokenResult<Claims> {
    let [header_b64, claims_b64, signature_b64] = split_segments(token)?;

    let header_bytes =
        decode_segment(header_b64).map_err(|e| TokenError::decode(Segment::Header, e))?;
    let header = Header::from_json(&header_bytes)
        .map_err(|e| TokenError::deserialization(Segment::Header, e))?;

    if header.typ != TOKEN_TYPE {
        return Err(TokenError::UnsupportedType(header.typ));
    }
    if header.alg != ALGORITHM {
        return Err(TokenError::UnsupportedAlgorithm(header.alg));
    }

    let signature =
        decode_segment(signature_b64).map_err(|e| TokenError::decode(Segment::Signature, e))?;
    // Signing input is the encoded text as received, not a re-encoding
    let signed_len = header_b64.len() + 1 + claims_b64.len();
    if !mac::verify(&token.as_bytes()[..signed_len], secret, &signature) {
        return Err(TokenError::InvalidSignature);
    }

    let claims_bytes =
        decode_segment(claims_b64).map_err(|e| TokenError::decode(Segment::Claims, e))?;
    let claims: Claims = serde_json::from_slice(&claims_bytes)
        .map_err(|e| TokenError::deserialization(Segment::Claims, e))?;

    if validation.validate_exp {
        if let Some(exp) = claims.expiration()? {
            if validation.is_expired(exp, validation.timestamp()) {
                return Err(TokenError::ExpiredToken { exp });
            }
        }
    }

    tracing::trace!(claim_count = claims.len(), "verified HS256 token");
    Ok(claims)
}
