//! Segment codec - JSON serialization plus URL-safe base64
//!
//! Segments are encoded with the padded URL-safe alphabet. Decoding is
//! strict: the padding must be canonical and trailing bits must be zero, so
//! every accepted segment has exactly one textual form.

use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use serde::Serialize;

/// Serialize `value` to JSON and encode it as a token segment
///
/// # Errors
/// Returns the `serde_json` error when `value` cannot be represented as JSON.
#[inline]
pub fn encode_segment<T>(value: &T) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(value)?;
    Ok(encode_bytes(&json))
}

/// Encode raw bytes as a token segment
#[inline]
#[must_use]
pub fn encode_bytes(input: &[u8]) -> String {
    URL_SAFE.encode(input)
}

/// Decode a token segment back into bytes
///
/// # Errors
/// Returns `base64::DecodeError` on characters outside the URL-safe
/// alphabet, bad padding, or non-zero trailing bits.
#[inline]
pub fn decode_segment(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE.decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_segment_is_padded() {
        let encoded = encode_segment(&json!({"user": "jackmarshall"}))
            .expect("JSON value should serialize");
        assert_eq!(encoded, "eyJ1c2VyIjoiamFja21hcnNoYWxsIn0=");
    }

    #[test]
    fn test_decode_segment_inverts_encode() {
        let decoded = decode_segment("eyJ1c2VyIjoiamFja21hcnNoYWxsIn0=")
            .expect("valid segment should decode");
        assert_eq!(decoded, br#"{"user":"jackmarshall"}"#);
    }

    #[test]
    fn test_decode_segment_rejects_missing_padding() {
        assert!(decode_segment("eyJ1c2VyIjoiamFja21hcnNoYWxsIn0").is_err());
    }

    #[test]
    fn test_decode_segment_rejects_standard_alphabet() {
        // '+' and '/' belong to the standard alphabet only
        assert!(decode_segment("ab+/").is_err());
        assert_eq!(decode_segment("ab-_").expect("url-safe chars"), vec![0x69, 0xbf, 0xbf]);
    }

    #[test]
    fn test_decode_segment_rejects_whitespace() {
        assert!(decode_segment("eyJ0eXAiOiJK V1QifQ==").is_err());
    }

    #[test]
    fn test_nested_values_encode_with_sorted_keys() {
        let encoded = encode_segment(&json!({"b": [1, {"d": null, "c": true}], "a": 1.5}))
            .expect("JSON value should serialize");
        let decoded = decode_segment(&encoded).expect("segment should decode");
        assert_eq!(decoded, br#"{"a":1.5,"b":[1,{"c":true,"d":null}]}"#);
    }
}
