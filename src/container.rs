//! Textual container format
//!
//! Owns the on-disk layout of an encrypted file. The container is a
//! sequence of newline-terminated text lines with positional meaning:
//!
//! - line 0: counter seed as decimal digits
//! - line 1: salt as lowercase hex (32 characters)
//! - lines 2..: one lowercase-hex ciphertext line per plaintext line
//!
//! There are no field tags or version markers; line order is the
//! contract.

use crate::cipher::CounterSeed;
use crate::error::{ErrorKind, LinecryptError, Result};
use crate::hexcodec;
use crate::kdf::SALT_LEN;

/// Number of header lines (counter seed + salt) preceding the body.
const HEADER_LINES: usize = 2;

/// Decoded form of an encrypted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Initial counter value shared by every ciphertext line.
    pub seed: CounterSeed,
    /// Key derivation salt recovered on decryption.
    pub salt: [u8; SALT_LEN],
    /// Raw ciphertext bytes, one entry per original plaintext line.
    pub lines: Vec<Vec<u8>>,
}

impl Container {
    /// Encode the container as its on-disk line sequence. Every line
    /// carries a trailing newline.
    pub fn encode(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(HEADER_LINES + self.lines.len());
        out.push(format!("{}\n", self.seed.to_decimal()));
        out.push(format!("{}\n", hexcodec::encode(&self.salt)));
        for line in &self.lines {
            out.push(format!("{}\n", hexcodec::encode(line)));
        }
        out
    }

    /// Decode a raw line sequence back into a container.
    ///
    /// Lines may or may not carry their trailing newline; it is
    /// stripped before parsing. All remaining lines after the two-line
    /// header are treated as hex ciphertext, each decoded
    /// independently.
    pub fn decode(raw_lines: &[String]) -> Result<Self> {
        if raw_lines.len() < HEADER_LINES {
            return Err(LinecryptError::new(
                ErrorKind::ContainerTruncated,
                format!(
                    "container has {} line(s); at least {} required",
                    raw_lines.len(),
                    HEADER_LINES
                ),
            ));
        }

        let seed = CounterSeed::from_decimal(trimmed(&raw_lines[0]))
            .map_err(|e| e.with_context("invalid counter seed line"))?;

        let salt_bytes = hexcodec::decode(trimmed(&raw_lines[1]))
            .map_err(|e| e.with_context("invalid salt line"))?;
        let salt: [u8; SALT_LEN] = salt_bytes.try_into().map_err(|bytes: Vec<u8>| {
            LinecryptError::new(
                ErrorKind::HeaderFormat,
                format!("salt is {} bytes; expected {}", bytes.len(), SALT_LEN),
            )
        })?;

        let mut lines = Vec::with_capacity(raw_lines.len() - HEADER_LINES);
        for raw in &raw_lines[HEADER_LINES..] {
            lines.push(hexcodec::decode(trimmed(raw))?);
        }

        Ok(Self { seed, salt, lines })
    }
}

fn trimmed(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}
