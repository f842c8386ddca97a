//! Token type definitions

use chrono::{DateTime, Duration, Utc};
use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{TokenError, TokenResult};

/// The only token type this crate produces or accepts
pub const TOKEN_TYPE: &str = "JWT";

/// The only algorithm this crate produces or accepts
pub const ALGORITHM: &str = "HS256";

/// Name of the expiration claim
pub const EXPIRATION_CLAIM: &str = "exp";

/// Token header
///
/// Field order is part of the wire format: `typ` serializes before `alg`.
/// Missing or `null` fields decode as empty strings so that they fail the
/// header content check instead of the JSON check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Token type
    #[serde(default, deserialize_with = "null_as_empty")]
    pub typ: String,
    /// Signing algorithm
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alg: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Header {
    /// Encoded form of `{"typ":"JWT","alg":"HS256"}`
    pub(crate) const HS256_SEGMENT: &'static str = "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzI1NiJ9";

    /// The fixed header of every token this crate signs
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: ALGORITHM.to_string(),
        }
    }

    /// Read a header from JSON text
    ///
    /// Only an object or `null` is accepted; `null` reads as an empty header.
    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let unexpected = match serde_json::from_slice::<Value>(bytes)? {
            Value::Null => return Ok(Self::default()),
            object @ Value::Object(_) => return serde_json::from_value(object),
            Value::Bool(b) => Unexpected::Bool(b),
            Value::Number(_) => Unexpected::Other("number"),
            Value::String(_) => Unexpected::Other("string"),
            Value::Array(_) => Unexpected::Seq,
        };
        Err(serde_json::Error::invalid_type(unexpected, &"a header object"))
    }
}

/// Token claims, an object of arbitrary JSON values
///
/// Only `exp` carries meaning for verification; every other key is opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Empty claims
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a claim, replacing any previous value under `key`
    #[must_use]
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set `exp` to the given instant
    #[must_use]
    pub fn expires_at(self, at: DateTime<Utc>) -> Self {
        self.claim(EXPIRATION_CLAIM, at.timestamp())
    }

    /// Set `exp` relative to now
    #[must_use]
    pub fn expires_in(self, dur: Duration) -> Self {
        self.expires_at(Utc::now() + dur)
    }

    /// The `exp` claim as a Unix timestamp, if present
    ///
    /// Any JSON integer is accepted, as is a finite float with no fractional
    /// part (some encoders write every number as a float). Values beyond the
    /// `i64` range saturate to `i64::MIN`/`i64::MAX`.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidClaim` when `exp` is present but is not
    /// an integer timestamp.
    pub fn expiration(&self) -> TokenResult<Option<i64>> {
        let Some(exp) = self.0.get(EXPIRATION_CLAIM) else {
            return Ok(None);
        };
        numeric_date(exp).map(Some).ok_or_else(|| {
            TokenError::invalid_claim(EXPIRATION_CLAIM, format!("{exp} is not a NumericDate"))
        })
    }

    /// Consume the claims and return the underlying map
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

#[allow(clippy::cast_possible_truncation)]
fn numeric_date(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(secs) = n.as_i64() {
        return Some(secs);
    }
    if n.is_u64() {
        return Some(i64::MAX);
    }
    let secs = n.as_f64()?;
    // `as` saturates out-of-range floats
    (secs.is_finite() && secs.fract() == 0.0).then_some(secs as i64)
}

impl Deref for Claims {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Claims {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Claims> for Map<String, Value> {
    fn from(claims: Claims) -> Self {
        claims.0
    }
}

impl From<Claims> for Value {
    fn from(claims: Claims) -> Self {
        Value::Object(claims.0)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Claims {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Claims {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Signed token string
///
/// Constructing one through [`FromStr`] only checks the segment structure;
/// use [`crate::parse`] to verify it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn from_segments(header: &str, claims: &str, signature: &str) -> Self {
        Self(format!("{header}.{claims}.{signature}"))
    }

    /// The token text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token and return its text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Split a token into its three segments, rejecting any other shape
pub(crate) fn split_segments(token: &str) -> TokenResult<[&str; 3]> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(c), Some(s), None) if !h.is_empty() && !c.is_empty() && !s.is_empty() => {
            Ok([h, c, s])
        }
        _ => Err(TokenError::MalformedToken {
            segments: token.split('.').count(),
        }),
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split_segments(s)?;
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_segment;
    use serde_json::json;

    #[test]
    fn test_header_segment_matches_serialized_header() {
        let encoded = encode_segment(&Header::hs256()).expect("header should serialize");
        assert_eq!(encoded, Header::HS256_SEGMENT);
    }

    #[test]
    fn test_header_missing_fields_default_to_empty() {
        let header: Header = serde_json::from_str(r#"{"alg":"HS256"}"#).expect("valid JSON object");
        assert_eq!(header.typ, "");
        assert_eq!(header.alg, ALGORITHM);
    }

    #[test]
    fn test_header_null_fields_default_to_empty() {
        let header: Header =
            serde_json::from_str(r#"{"typ":null,"alg":null}"#).expect("valid JSON object");
        assert_eq!(header, Header::default());
    }

    #[test]
    fn test_header_from_json_shapes() {
        assert_eq!(Header::from_json(b"null").expect("null header"), Header::default());
        assert_eq!(
            Header::from_json(br#"{"typ":"JWT","alg":"HS256"}"#).expect("object header"),
            Header::hs256()
        );
        let rejected: [&[u8]; 5] = [br#"["JWT","HS256"]"#, b"true", b"1", br#""JWT""#, b"{"];
        for bad in rejected {
            assert!(Header::from_json(bad).is_err());
        }
    }

    #[test]
    fn test_header_ignores_extra_fields() {
        let header: Header = serde_json::from_str(r#"{"typ":"JWT","alg":"HS256","kid":"k1"}"#)
            .expect("valid JSON object");
        assert_eq!(header, Header::hs256());
    }

    #[test]
    fn test_claims_builder() {
        let claims = Claims::new()
            .claim("user", "jackmarshall")
            .claim("roles", json!(["read", "write"]))
            .expires_in(Duration::hours(1));

        assert_eq!(claims.get("user"), Some(&json!("jackmarshall")));
        assert_eq!(claims.get("roles"), Some(&json!(["read", "write"])));
        let exp = claims
            .expiration()
            .expect("exp should be an integer")
            .expect("exp should be set");
        assert!(exp > Utc::now().timestamp());
    }

    #[test]
    fn test_claims_serialize_as_plain_object() {
        let claims = Claims::new().claim("a", 1);
        assert_eq!(serde_json::to_string(&claims).expect("serialize"), r#"{"a":1}"#);
    }

    #[test]
    fn test_expiration_absent() {
        assert_eq!(Claims::new().expiration().expect("no exp"), None);
    }

    #[test]
    fn test_expiration_accepts_integral_float() {
        let claims = Claims::new().claim("exp", 1_700_000_000.0);
        assert_eq!(claims.expiration().expect("integral float"), Some(1_700_000_000));
    }

    #[test]
    fn test_expiration_saturates_out_of_range() {
        let claims = Claims::new().claim("exp", u64::MAX);
        assert_eq!(claims.expiration().expect("large integer"), Some(i64::MAX));

        let far: Value = serde_json::from_str("99999999999999999999").expect("valid JSON number");
        let claims = Claims::new().claim("exp", far);
        assert_eq!(claims.expiration().expect("huge integer"), Some(i64::MAX));

        let claims = Claims::new().claim("exp", -1e20);
        assert_eq!(claims.expiration().expect("integral float"), Some(i64::MIN));
    }

    #[test]
    fn test_expiration_rejects_non_integers() {
        for bad in [json!("1700000000"), json!(1.5), json!(null), json!(true)] {
            let claims = Claims::new().claim("exp", bad);
            let err = claims.expiration().expect_err("should be rejected");
            assert_eq!(err.kind(), crate::ErrorKind::InvalidClaim);
        }
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("a.b.c").expect("three segments"), ["a", "b", "c"]);
        for bad in ["", "abc", "a.b", "a.b.c.d", ".b.c", "a..c", "a.b."] {
            let err = split_segments(bad).expect_err("should be malformed");
            assert_eq!(err.kind(), crate::ErrorKind::MalformedToken);
        }
    }

    #[test]
    fn test_token_from_str_checks_structure() {
        assert!("a.b.c".parse::<Token>().is_ok());
        assert!("thisisnotavalidtoken".parse::<Token>().is_err());
    }
}
