//! Seedlock - passphrase-based encryption for wallet recovery phrases

#![forbid(unsafe_code)]

pub mod digest;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod passphrase;
pub mod secretcrypt;
pub mod vault;

pub use digest::sha256_hex;
pub use error::{ErrorCategory, ErrorKind, Result, SeedlockError};
pub use secretcrypt::{decrypt, encrypt, encrypt_with_rng, try_decrypt};
