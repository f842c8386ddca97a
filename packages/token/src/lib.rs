//! HS256 signed claims tokens
//!
//! A token is three URL-safe base64 segments joined by dots: the fixed
//! header `{"typ":"JWT","alg":"HS256"}`, the JSON claims, and the
//! HMAC-SHA256 of the first two segments as they appear in the token.
//!
//! ```
//! use cryypt_token::{Claims, sign, parse};
//!
//! let claims = Claims::new().claim("user", "jackmarshall");
//! let token = sign(&claims, b"secret")?;
//! assert_eq!(parse(token.as_str(), b"secret")?, claims);
//! # Ok::<(), cryypt_token::TokenError>(())
//! ```
//!
//! Only HS256 is ever computed. A header naming any other algorithm is
//! rejected before the signature is looked at.

#![forbid(unsafe_code)]

pub mod codec;
mod decoder;
mod encoder;
mod error;
pub mod mac;
mod types;
mod validation;

pub use decoder::{parse, parse_with};
pub use encoder::sign;
pub use error::{ErrorKind, Segment, TokenError, TokenResult};
pub use types::{ALGORITHM, Claims, EXPIRATION_CLAIM, Header, TOKEN_TYPE, Token};
pub use validation::Validation;
