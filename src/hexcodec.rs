//! Hex armoring for binary data
//!
//! Reversible binary-to-text encoding used to embed raw ciphertext and
//! the salt in the line-oriented container. Lowercase hex, two
//! characters per byte, no whitespace.

use crate::error::{ErrorKind, LinecryptError, Result};

/// Encode bytes as a lowercase hex string (2x the input length).
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string back into bytes.
///
/// Fails on odd-length input or non-hex characters.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| {
        LinecryptError::with_source(ErrorKind::HexDecode, format!("hex decoding failed: {}", e), e)
    })
}
