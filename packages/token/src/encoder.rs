//! Token signing

use serde::Serialize;
use serde_json::Value;

use crate::codec::{encode_bytes, encode_segment};
use crate::error::{TokenError, TokenResult};
use crate::mac;
use crate::types::{Header, Token};

/// Sign `claims` into an HS256 token
///
/// `claims` may be any serializable value that produces a JSON object:
/// [`crate::Claims`], a `serde_json::Map`, or a struct deriving `Serialize`.
///
/// # Errors
/// Returns `TokenError::Serialization` if `claims` fails to serialize or
/// does not serialize to a JSON object.
pub fn sign<C>(claims: &C, secret: &[u8]) -> TokenResult<Token>
where
    C: Serialize + ?Sized,
{
    let claims = match serde_json::to_value(claims) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(TokenError::serialization(format!(
                "claims must serialize to a JSON object, got {}",
                json_type(&other)
            )));
        }
        Err(e) => {
            return Err(TokenError::serialization(format!(
                "Failed to serialize claims: {e}"
            )));
        }
    };

    let header_b64 = Header::HS256_SEGMENT;
    let claims_b64 = encode_segment(&claims)
        .map_err(|e| TokenError::serialization(format!("Failed to serialize claims: {e}")))?;

    let message = format!("{header_b64}.{claims_b64}");
    let signature_b64 = encode_bytes(&mac::sign(message.as_bytes(), secret));

    tracing::trace!(
        claims_len = claims_b64.len(),
        claim_count = claims.len(),
        "signed HS256 token"
    );

    Ok(Token::from_segments(header_b64, &claims_b64, &signature_b64))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
