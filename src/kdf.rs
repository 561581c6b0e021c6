//! Passphrase key derivation using PBKDF2-HMAC-SHA256

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Length of derived key in bytes
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
///
/// This value is part of the stored envelope format: every envelope
/// ever written was keyed through exactly 1000 rounds, so raising it
/// would make existing envelopes undecryptable. Do not change it
/// without a re-keying migration for stored secrets.
pub const PBKDF2_ROUNDS: u32 = 1000;

/// Derive a 32-byte key from a passphrase and salt.
///
/// Deterministic: the same `(passphrase, salt)` pair always yields the
/// same key. The key is wrapped in `Zeroizing` so it is wiped from
/// memory when dropped.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ROUNDS, key.as_mut_slice());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let k1 = derive_key(b"hunter2", b"");
        let k2 = derive_key(b"hunter2", b"");
        assert_eq!(*k1, *k2);
    }

    #[test]
    fn test_passphrase_changes_key() {
        let k1 = derive_key(b"hunter2", b"");
        let k2 = derive_key(b"hunter3", b"");
        assert_ne!(*k1, *k2);
    }

    #[test]
    fn test_salt_changes_key() {
        let k1 = derive_key(b"hunter2", b"");
        let k2 = derive_key(b"hunter2", b"salt");
        assert_ne!(*k1, *k2);
    }

    #[test]
    fn test_known_vector() {
        // PBKDF2-HMAC-SHA256("hunter2", salt="", 1000 rounds, 32 bytes),
        // cross-checked against an independent implementation.
        let key = derive_key(b"hunter2", b"");
        assert_eq!(
            hex::encode(*key),
            "de0b84dcac64e76e8376a8dfc64a97c77e0d319604d339120ddc514b1e554668"
        );
    }

    #[test]
    fn test_empty_passphrase() {
        let key = derive_key(b"", b"");
        assert_eq!(key.len(), KEY_LEN);
    }
}
