//! Feishu custom-bot request signing.
//!
//! The bot verifies `sign` by keying HMAC-SHA256 with `"{timestamp}\n{secret}"`
//! and hashing no data at all. The payload is not covered.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the base64 signature for `timestamp` (Unix seconds) and `secret`.
pub fn sign(timestamp: i64, secret: &str) -> String {
    let key = format!("{timestamp}\n{secret}");
    // HMAC hashes over-long keys and pads short ones; no length is rejected.
    let mac = <HmacSha256 as KeyInit>::new_from_slice(key.as_bytes())
        .expect("HMAC key of any length");
    STANDARD.encode(mac.finalize().into_bytes())
}
