//! Content fingerprinting
//!
//! A plain SHA-256 digest rendered as hex. This is a content digest,
//! not a MAC: no key, no salt. Callers use it as a verifiable,
//! non-secret fingerprint of arbitrary text and may rely on the fixed
//! 64-character output length.

use sha2::{Digest, Sha256};

/// SHA-256 of the UTF-8 bytes of `input`, as 64 lowercase hex characters.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}
