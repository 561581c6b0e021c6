//! File-level operations on sealed recovery phrases
//!
//! The envelope string is the only persisted artifact; these operations
//! move it between files and plaintext. Writes are atomic (tempfile +
//! fsync + rename) so an existing sealed file is never left half
//! replaced, and output files are created with mode 0o600 on Unix.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::digest;
use crate::error::{ErrorCategory, ErrorKind, Result, SeedlockError};
use crate::passphrase::PassphraseReader;
use crate::secretcrypt;

/// Encrypt the contents of `input_path` and write the envelope to
/// `output_path`.
pub fn seal_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let plaintext = read_text_file(input_path)?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let passphrase = passphrase_as_str(&passphrase)?;

    let envelope =
        secretcrypt::encrypt(passphrase, &plaintext).map_err(|e| e.with_context("seal failed"))?;
    write_file_atomic(output_path, envelope.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

/// Decrypt the envelope stored at `input_path` and write the plaintext
/// to `output_path`.
///
/// Unlike the library-level [`secretcrypt::decrypt`], a failed
/// decryption here is a reportable error: a CLI user wants to know
/// whether the file was malformed or the passphrase wrong, not an
/// empty output file.
pub fn unseal_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<()> {
    let envelope = read_text_file(input_path)?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let passphrase = passphrase_as_str(&passphrase)?;

    let plaintext = secretcrypt::try_decrypt(passphrase, envelope.trim_end_matches('\n'))
        .map_err(|e| e.with_context("unseal failed"))?;
    write_file_atomic(output_path, plaintext.as_bytes())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;
    Ok(())
}

/// Compute the SHA-256 hex fingerprint of the text stored at `input_path`.
pub fn digest_file(input_path: &Path) -> Result<String> {
    let contents = read_text_file(input_path)?;
    Ok(digest::sha256_hex(&contents))
}

/// The encryption API takes `&str`; readers hand back arbitrary bytes.
fn passphrase_as_str(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::PassphraseUnavailable,
            "passphrase is not valid UTF-8",
            e,
        )
    })
}

fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::User,
            ErrorKind::Io,
            format!("{} is not valid UTF-8", path.display()),
            e,
        )
    })
}

/// Write a file atomically with restrictive permissions.
///
/// The data lands in a tempfile in the target directory, is flushed and
/// fsynced, then renamed over the target so the target always holds
/// either the old contents or the new contents in full.
fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        SeedlockError::with_kind(
            ErrorCategory::User,
            ErrorKind::Io,
            "output path has no parent directory",
        )
    })?;
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to create tempfile",
            e,
        )
    })?;

    temp_file.write_all(contents).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to write to tempfile",
            e,
        )
    })?;
    // Flush and fsync() such that the rename, if it succeeds, will
    // always point to a fully written file.
    temp_file.flush().and_then(|_| temp_file.as_file().sync_all()).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            "failed to sync tempfile prior to rename",
            e,
        )
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| {
                SeedlockError::with_kind_and_source(
                    ErrorCategory::Internal,
                    ErrorKind::Io,
                    "failed to set tempfile permissions",
                    e,
                )
            })?;
    }

    temp_file.persist(path).map_err(|e| {
        SeedlockError::with_kind_and_source(
            ErrorCategory::Internal,
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

fn read_error(path: &Path, err: io::Error) -> SeedlockError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    SeedlockError::with_kind_and_source(
        category,
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
}
