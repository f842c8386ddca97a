//! HMAC-SHA256 operations for token signing and verification

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HMAC-SHA256 tag
pub const MAC_LEN: usize = 32;

/// Compute HMAC-SHA256 of `message` under `key`
///
/// Infallible: HMAC hashes keys longer than the block size and pads shorter
/// ones, so every key length (empty included) is accepted and the key
/// initialization cannot fail.
#[must_use]
pub fn sign(message: &[u8], key: &[u8]) -> [u8; MAC_LEN] {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC-SHA256 accepts keys of any length")
    };
    mac.update(message);
    mac.finalize().into_bytes().into()
}

/// Check `candidate` against the MAC of `message` under `key`
///
/// The comparison runs in constant time over the tag bytes. A candidate of
/// the wrong length is rejected without error.
#[must_use]
pub fn verify(message: &[u8], key: &[u8], candidate: &[u8]) -> bool {
    let expected = sign(message, key);
    bool::from(candidate.ct_eq(&expected[..]))
}
