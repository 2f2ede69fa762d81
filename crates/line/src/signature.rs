//! Webhook signature verification.
//!
//! LINE signs every webhook with `base64(HMAC-SHA256(channel_secret, body))`
//! and sends it in the `x-line-signature` header. The MAC must be computed
//! over the exact bytes received; re-serializing the JSON first changes
//! whitespace and key order and breaks verification.

use {
    base64::{Engine, engine::general_purpose::STANDARD},
    hmac::{Hmac, Mac},
    sha2::Sha256,
    tracing::warn,
};

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

fn keyed(secret: &str) -> Option<HmacSha256> {
    HmacSha256::new_from_slice(secret.as_bytes()).ok()
}

/// Compute the signature LINE would send for `body`.
pub fn sign(body: &[u8], secret: &str) -> String {
    let Some(mut mac) = keyed(secret) else {
        return String::new();
    };
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Check `signature` against `body` in constant time.
pub fn verify(body: &[u8], secret: &str, signature: &str) -> bool {
    let Ok(provided) = STANDARD.decode(signature.trim()) else {
        warn!("signature header is not valid base64");
        return false;
    };
    let Some(mut mac) = keyed(secret) else {
        warn!("failed to create HMAC");
        return false;
    };
    mac.update(body);
    mac.verify_slice(&provided).is_ok()
}

/// Reject the request unless a matching signature header was supplied.
pub fn authenticate(body: &[u8], secret: &str, signature: Option<&str>) -> Result<()> {
    let signature = signature
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::authentication("missing signature header"))?;
    if verify(body, secret, signature) {
        Ok(())
    } else {
        Err(Error::authentication("signature mismatch"))
    }
}
