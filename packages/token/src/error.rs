//! Error types for token signing and parsing

use std::fmt;
use thiserror::Error;

/// Result type for token operations
pub type TokenResult<T> = std::result::Result<T, TokenError>;

/// Token segment an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// First segment, the encoded header
    Header,
    /// Second segment, the encoded claims
    Claims,
    /// Third segment, the encoded MAC
    Signature,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Header => f.write_str("header"),
            Segment::Claims => f.write_str("claims"),
            Segment::Signature => f.write_str("signature"),
        }
    }
}

/// Errors produced while signing or parsing a token
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token does not have exactly three non-empty segments
    #[error("Malformed token: expected 3 non-empty segments, found {segments}")]
    MalformedToken {
        /// Number of dot-separated parts found
        segments: usize,
    },

    /// A segment is not valid URL-safe base64
    #[error("Invalid base64 in {segment} segment: {source}")]
    Decode {
        /// Segment that failed to decode
        segment: Segment,
        /// Underlying base64 error
        #[source]
        source: base64::DecodeError,
    },

    /// A decoded segment is not the expected JSON document
    #[error("Invalid JSON in {segment} segment: {source}")]
    Deserialization {
        /// Segment that failed to deserialize
        segment: Segment,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Header `typ` is not `JWT`
    #[error("Unsupported token type: {0:?}")]
    UnsupportedType(String),

    /// Header `alg` is not `HS256`
    #[error("Unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// MAC mismatch, either tampered content or the wrong secret
    #[error("Invalid token signature")]
    InvalidSignature,

    /// A claim the verifier interprets has an unusable value
    #[error("Invalid claim {claim:?}: {reason}")]
    InvalidClaim {
        /// Claim name
        claim: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The `exp` claim lies in the past
    #[error("Token expired at {exp}")]
    ExpiredToken {
        /// Expiration timestamp carried by the token
        exp: i64,
    },

    /// Claims could not be serialized into a JSON object
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Flat classification of [`TokenError`], for callers that map errors to
/// responses without caring about the attached context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TokenError::MalformedToken`]
    MalformedToken,
    /// See [`TokenError::Decode`]
    Decode,
    /// See [`TokenError::Deserialization`]
    Deserialization,
    /// See [`TokenError::UnsupportedType`]
    UnsupportedType,
    /// See [`TokenError::UnsupportedAlgorithm`]
    UnsupportedAlgorithm,
    /// See [`TokenError::InvalidSignature`]
    InvalidSignature,
    /// See [`TokenError::InvalidClaim`]
    InvalidClaim,
    /// See [`TokenError::ExpiredToken`]
    ExpiredToken,
    /// See [`TokenError::Serialization`]
    Serialization,
}

impl TokenError {
    /// Classification of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::MalformedToken { .. } => ErrorKind::MalformedToken,
            TokenError::Decode { .. } => ErrorKind::Decode,
            TokenError::Deserialization { .. } => ErrorKind::Deserialization,
            TokenError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            TokenError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            TokenError::InvalidSignature => ErrorKind::InvalidSignature,
            TokenError::InvalidClaim { .. } => ErrorKind::InvalidClaim,
            TokenError::ExpiredToken { .. } => ErrorKind::ExpiredToken,
            TokenError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Create an invalid claim error
    #[inline]
    #[must_use]
    pub fn invalid_claim(claim: &'static str, reason: impl Into<String>) -> Self {
        TokenError::InvalidClaim {
            claim,
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        TokenError::Serialization(msg.into())
    }

    pub(crate) fn decode(segment: Segment, source: base64::DecodeError) -> Self {
        TokenError::Decode { segment, source }
    }

    pub(crate) fn deserialization(segment: Segment, source: serde_json::Error) -> Self {
        TokenError::Deserialization { segment, source }
    }
}
