//! Textual envelope format for encrypted secrets
//!
//! An envelope is the only externally persisted artifact. It is three
//! hex-encoded components joined by a literal `-`, in fixed order:
//!
//! ```text
//! <hex(salt)>-<hex(nonce)>-<hex(sealed ciphertext with tag)>
//! ```
//!
//! The salt component is empty for every envelope this crate produces
//! (zero hex characters before the first `-`); parsing still accepts a
//! non-empty salt so foreign envelopes remain readable. The sealed
//! component is the AEAD output with the 16-byte tag appended, not a
//! separate tag+body pair.

use std::fmt;

use crate::error::{ErrorCategory, ErrorKind, Result, SeedlockError};

/// Length of nonce in bytes. AES-GCM rejects any other length here.
pub const NONCE_LEN: usize = 12;

/// Separator between the hex-encoded envelope components
const SEPARATOR: char = '-';

/// Parsed envelope components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub sealed: Vec<u8>,
}

impl Envelope {
    /// Parse an envelope string into its decoded components.
    ///
    /// Fails with a kind-tagged error on wrong segment count, invalid
    /// hex in any segment, or a nonce that is not exactly 12 bytes.
    pub fn parse(text: &str) -> Result<Envelope> {
        let segments: Vec<&str> = text.split(SEPARATOR).collect();
        if segments.len() != 3 {
            return Err(SeedlockError::with_kind(
                ErrorCategory::User,
                ErrorKind::EnvelopeFormat,
                format!(
                    "expected 3 dash-separated segments, found {}",
                    segments.len()
                ),
            ));
        }

        let salt = decode_segment(segments[0], "salt")?;
        let nonce_bytes = decode_segment(segments[1], "nonce")?;
        let sealed = decode_segment(segments[2], "ciphertext")?;

        let nonce: [u8; NONCE_LEN] = nonce_bytes.try_into().map_err(|bytes: Vec<u8>| {
            SeedlockError::with_kind(
                ErrorCategory::User,
                ErrorKind::NonceLength,
                format!("nonce is {} bytes, expected {}", bytes.len(), NONCE_LEN),
            )
        })?;

        Ok(Envelope {
            salt,
            nonce,
            sealed,
        })
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            hex::encode(&self.salt),
            SEPARATOR,
            hex::encode(self.nonce),
            SEPARATOR,
            hex::encode(&self.sealed)
        )
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>> {
    hex::decode(segment).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::EnvelopeDecode,
            format!("{} segment is not valid hex", name),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let envelope = Envelope {
            salt: Vec::new(),
            nonce: [7u8; NONCE_LEN],
            sealed: vec![0xde, 0xad, 0xbe, 0xef],
        };
        let text = envelope.to_string();
        assert_eq!(text, "-070707070707070707070707-deadbeef");
        assert_eq!(Envelope::parse(&text).unwrap(), envelope);
    }

    #[test]
    fn test_nonempty_salt_roundtrip() {
        let envelope = Envelope {
            salt: vec![0x01, 0x02],
            nonce: [0u8; NONCE_LEN],
            sealed: vec![0xff],
        };
        assert_eq!(Envelope::parse(&envelope.to_string()).unwrap(), envelope);
    }

    #[test]
    fn test_empty_input() {
        let err = Envelope::parse("").expect_err("expected segment count error");
        assert_eq!(err.kind, Some(ErrorKind::EnvelopeFormat));
    }

    #[test]
    fn test_too_few_segments() {
        let err = Envelope::parse("aabb").expect_err("expected segment count error");
        assert_eq!(err.kind, Some(ErrorKind::EnvelopeFormat));

        let err = Envelope::parse("aa-bb").expect_err("expected segment count error");
        assert_eq!(err.kind, Some(ErrorKind::EnvelopeFormat));
    }

    #[test]
    fn test_too_many_segments() {
        let err = Envelope::parse("aa-bb-cc-dd").expect_err("expected segment count error");
        assert_eq!(err.kind, Some(ErrorKind::EnvelopeFormat));
    }

    #[test]
    fn test_invalid_hex() {
        let err = Envelope::parse("zz-000000000000000000000000-aabb")
            .expect_err("expected hex decode error");
        assert_eq!(err.kind, Some(ErrorKind::EnvelopeDecode));
    }

    #[test]
    fn test_odd_length_hex() {
        let err = Envelope::parse("-000000000000000000000000-abc")
            .expect_err("expected hex decode error");
        assert_eq!(err.kind, Some(ErrorKind::EnvelopeDecode));
    }

    #[test]
    fn test_short_nonce() {
        let err = Envelope::parse("-00-aabb").expect_err("expected nonce length error");
        assert_eq!(err.kind, Some(ErrorKind::NonceLength));
    }

    #[test]
    fn test_long_nonce() {
        // 13 bytes
        let err = Envelope::parse("-00000000000000000000000000-aabb")
            .expect_err("expected nonce length error");
        assert_eq!(err.kind, Some(ErrorKind::NonceLength));
    }

    #[test]
    fn test_only_dashes() {
        let err = Envelope::parse("--").expect_err("expected nonce length error");
        // All three segments decode as empty hex; the nonce check rejects it.
        assert_eq!(err.kind, Some(ErrorKind::NonceLength));
    }
}
