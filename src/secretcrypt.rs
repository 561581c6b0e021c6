//! Recovery-phrase encryption using PBKDF2 + AES-256-GCM
//!
//! This module implements passphrase-based encryption using:
//! - PBKDF2-HMAC-SHA256 (1000 rounds) for key derivation from passphrase
//! - AES-256-GCM for authenticated encryption (128-bit tag, no AAD)
//!
//! The textual output format is documented in [`crate::envelope`].
//!
//! Two properties of the format are preserved for compatibility with
//! previously stored envelopes and must not be "fixed" in place:
//! - The salt is always empty at encryption time, so a given passphrase
//!   always derives the same key. Per-record salting would be stronger
//!   but would orphan every stored envelope.
//! - The PBKDF2 round count is fixed at 1000 (see [`crate::kdf`]).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::envelope::{Envelope, NONCE_LEN};
use crate::error::{ErrorCategory, ErrorKind, Result, SeedlockError};
use crate::kdf;

/// Encrypt a plaintext with a passphrase, using the OS entropy source
/// for the nonce.
///
/// Returns the textual envelope. Fails only if the platform cannot
/// supply random bytes or the cipher cannot seal.
pub fn encrypt(passphrase: &str, plaintext: &str) -> Result<String> {
    encrypt_with_rng(&mut OsRng, passphrase, plaintext)
}

/// Encrypt a plaintext with a passphrase, drawing the nonce from the
/// supplied generator.
///
/// The generator must be cryptographically secure; it is a parameter so
/// that callers control the entropy source and tests can be made
/// deterministic. Nonce reuse under one passphrase breaks GCM
/// confidentiality, so never pass a generator that can repeat output
/// across calls.
pub fn encrypt_with_rng<R>(rng: &mut R, passphrase: &str, plaintext: &str) -> Result<String>
where
    R: RngCore + CryptoRng,
{
    // Empty salt: see module docs.
    let key = kdf::derive_key(passphrase.as_bytes(), &[]);

    let mut nonce = [0u8; NONCE_LEN];
    rng.try_fill_bytes(&mut nonce).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::RandomnessFailure,
            "failed to obtain random bytes for nonce",
            e,
        )
    })?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| {
            SeedlockError::with_kind(
                ErrorCategory::Internal,
                ErrorKind::CipherFailure,
                format!("AES-GCM seal failed: {}", e),
            )
        })?;

    let envelope = Envelope {
        salt: Vec::new(),
        nonce,
        sealed,
    };
    Ok(envelope.to_string())
}

/// Decrypt an envelope with a passphrase, reporting why decryption
/// failed.
///
/// The error kind distinguishes structural problems (segment count,
/// hex, nonce length) from authentication failure; callers that only
/// need pass/fail should use [`decrypt`].
pub fn try_decrypt(passphrase: &str, envelope: &str) -> Result<String> {
    let envelope = Envelope::parse(envelope)?;
    let key = kdf::derive_key(passphrase.as_bytes(), &envelope.salt);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&envelope.nonce), envelope.sealed.as_slice())
        .map_err(|_| {
            SeedlockError::with_kind(
                ErrorCategory::User,
                ErrorKind::AuthenticationFailed,
                "corrupt envelope, tampered-with data, or wrong passphrase",
            )
        })?;

    String::from_utf8(plaintext).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::PlaintextEncoding,
            "recovered plaintext is not valid UTF-8",
            e,
        )
    })
}

/// Decrypt an envelope with a passphrase.
///
/// Total function: returns the empty string on any malformed or
/// tampered input, never an error and never a panic. Callers in a
/// verification path treat the empty string as "wrong passphrase or
/// corrupted data" with no separate error channel.
pub fn decrypt(passphrase: &str, envelope: &str) -> String {
    try_decrypt(passphrase, envelope).unwrap_or_default()
}
