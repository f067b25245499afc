//! `x-line-signature` handling.
//!
//! The signature is the base64 (standard alphabet) HMAC-SHA256 of the raw
//! request body, keyed with the channel secret.
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the signature LINE would send for `body`.
///
/// Returns `None` only if the secret is rejected as a key, which HMAC never
/// does for any length.
pub fn sign(channel_secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(base64::prelude::BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

/// Checks `signature` against `body` in constant time.
pub fn verify(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = base64::prelude::BASE64_STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
