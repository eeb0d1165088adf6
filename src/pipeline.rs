//! Encryption/decryption pipeline
//!
//! Orchestrates key derivation, the counter-mode engine, and the
//! container format for both directions. Encryption draws a fresh salt
//! and counter seed from the OS secure random source; decryption
//! re-derives the key from the salt recovered out of the container.

use crate::cipher::{self, CounterSeed};
use crate::container::Container;
use crate::error::{ErrorKind, LinecryptError, Result};
use crate::kdf::{self, SALT_LEN};
use rand::RngCore;
use rand::rngs::OsRng;

/// Encrypt plaintext lines with a passphrase using a random salt and
/// counter seed.
///
/// Each line (its trailing newline included) is the atomic unit of
/// encryption; every line is enciphered independently with the counter
/// restarting at the seed, not as a continuation of the previous
/// line's keystream.
pub fn encrypt_stream(lines: &[String], passphrase: &[u8]) -> Result<Container> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let seed = CounterSeed::random();

    encrypt_stream_with(lines, passphrase, seed, salt)
}

/// Encrypt plaintext lines using a provided seed and salt.
///
/// This function is ONLY for testing purposes to generate deterministic
/// output. NEVER use this in production - always use `encrypt_stream()`
/// which generates a random salt and seed per invocation.
pub fn encrypt_stream_with(
    lines: &[String],
    passphrase: &[u8],
    seed: CounterSeed,
    salt: [u8; SALT_LEN],
) -> Result<Container> {
    let key = kdf::derive_key(passphrase, &salt)?;

    let ciphertext_lines = lines
        .iter()
        .map(|line| cipher::transform(&key, &seed, line.as_bytes()))
        .collect();

    Ok(Container {
        seed,
        salt,
        lines: ciphertext_lines,
    })
}

/// Decrypt a container back into plaintext lines.
///
/// Fails with [`ErrorKind::NotText`] if any line's decrypted bytes are
/// not valid UTF-8 - the usual sign of a wrong passphrase. All lines
/// are buffered before returning; either every line decrypts to valid
/// text or the whole call fails with no partial output.
pub fn decrypt_stream(container: &Container, passphrase: &[u8]) -> Result<Vec<String>> {
    let key = kdf::derive_key(passphrase, &container.salt)?;

    let mut plaintext = Vec::with_capacity(container.lines.len());
    for (index, line) in container.lines.iter().enumerate() {
        let decrypted = cipher::transform(&key, &container.seed, line);
        let text = String::from_utf8(decrypted).map_err(|e| {
            LinecryptError::with_source(
                ErrorKind::NotText,
                format!(
                    "line {} did not decrypt to valid text; the passphrase may be wrong",
                    index + 1
                ),
                e,
            )
        })?;
        plaintext.push(text);
    }

    Ok(plaintext)
}
