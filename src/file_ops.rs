//! File encryption/decryption operations
//!
//! High-level operations tying passphrase reading, the pipeline, and
//! line-oriented file I/O together. Plaintext and container files are
//! both handled as sequences of newline-terminated text lines.

use crate::container::Container;
use crate::error::{ErrorCategory, ErrorKind, LinecryptError, Result};
use crate::passphrase::PassphraseReader;
use crate::pipeline;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Read a file as a sequence of text lines.
///
/// Every line keeps its trailing newline; the final line may lack one.
/// A missing file is reported as a user error.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    Ok(contents.split_inclusive('\n').map(str::to_string).collect())
}

/// Write a sequence of text lines to a file, atomically and with
/// restrictive permissions.
///
/// Lines are written verbatim; callers provide trailing newlines. The
/// write goes through a tempfile in the target directory followed by
/// fsync and rename, so the target is never left partially written.
/// The file ends up with mode 0o600 on Unix systems.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        LinecryptError::with_source(ErrorKind::Io, "failed to create tempfile", e)
    })?;

    for line in lines {
        temp_file.write_all(line.as_bytes()).map_err(|e| {
            LinecryptError::with_source(ErrorKind::Io, "failed to write to tempfile", e)
        })?;
    }
    // Flush and fsync() such that the rename later, if it succeeds, will
    // always point to a valid file.
    temp_file.flush().map_err(|e| {
        LinecryptError::with_source(ErrorKind::Io, "failed to flush tempfile", e)
    })?;
    temp_file.as_file().sync_all().map_err(|e| {
        LinecryptError::with_source(ErrorKind::Io, "failed to sync file prior to rename", e)
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = temp_file
            .as_file()
            .metadata()
            .map_err(|e| {
                LinecryptError::with_source(ErrorKind::Io, "failed to get tempfile metadata", e)
            })?
            .permissions();
        perms.set_mode(0o600);
        temp_file.as_file().set_permissions(perms).map_err(|e| {
            LinecryptError::with_source(ErrorKind::Io, "failed to set tempfile permissions", e)
        })?;
    }

    temp_file.persist(path).map_err(|e| {
        LinecryptError::with_source(
            ErrorKind::Io,
            format!("failed to rename to target file {}", path.display()),
            e,
        )
    })?;
    Ok(())
}

/// Encrypt a plaintext file into a container file.
///
/// Reads plaintext lines from `input_path`, encrypts them using a
/// passphrase from `passphrase_reader`, and writes the container to
/// `output_path`. When `erase` is set, the input file's contents are
/// replaced with an empty line sequence after the container write
/// succeeds - a destructive, irreversible side effect, default off.
pub fn encrypt_file(
    input_path: &Path,
    output_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
    erase: bool,
) -> Result<()> {
    let plaintext_lines = read_lines(input_path)?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let container = pipeline::encrypt_stream(&plaintext_lines, &passphrase)
        .map_err(|e| e.with_context("encryption failed"))?;
    write_lines(output_path, &container.encode())
        .map_err(|e| e.with_context(format!("failed to write to {}", output_path.display())))?;

    if erase {
        write_lines(input_path, &[String::new()])
            .map_err(|e| e.with_context(format!("failed to erase {}", input_path.display())))?;
    }

    Ok(())
}

/// Decrypt a container file with a passphrase.
///
/// Reads container lines from `input_path`, decrypts them using a
/// passphrase from `passphrase_reader`, and returns the joined
/// plaintext. Nothing is returned unless every line decrypts to valid
/// text.
pub fn decrypt_file(
    input_path: &Path,
    passphrase_reader: &mut dyn PassphraseReader,
) -> Result<String> {
    let raw_lines = read_lines(input_path)?;
    let container = Container::decode(&raw_lines)
        .map_err(|e| e.with_context(format!("failed to decode {}", input_path.display())))?;
    let passphrase = passphrase_reader.read_passphrase()?;
    let plaintext_lines = pipeline::decrypt_stream(&container, &passphrase)
        .map_err(|e| e.with_context("failed to decrypt"))?;
    Ok(plaintext_lines.concat())
}

fn read_error(path: &Path, err: io::Error) -> LinecryptError {
    let category = if err.kind() == io::ErrorKind::NotFound {
        ErrorCategory::User
    } else {
        ErrorCategory::Internal
    };
    LinecryptError::with_source(
        ErrorKind::Io,
        format!("failed to read from {}", path.display()),
        err,
    )
    .categorized(category)
}
