//! Key derivation from passphrase and salt
//!
//! Stretches a passphrase into a 256-bit AES key using
//! PBKDF2-HMAC-SHA256 with a per-encryption random salt.

use crate::error::{ErrorKind, LinecryptError, Result};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::Zeroizing;

/// Length of salt in bytes
pub const SALT_LEN: usize = 16;

/// Length of derived key in bytes
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count
const PBKDF2_ITERATIONS: u32 = 1000;

/// Derive a 32-byte key from a passphrase and salt.
///
/// Deterministic: identical inputs always produce an identical key. An
/// empty passphrase is permitted (weak, but not rejected). The key is
/// returned in a `Zeroizing` wrapper so it is wiped when dropped.
pub fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::<Hmac<Sha256>>(passphrase, salt, PBKDF2_ITERATIONS, &mut *key).map_err(|e| {
        LinecryptError::with_source(ErrorKind::KeyDerivation, "PBKDF2 key derivation failed", e)
    })?;
    Ok(key)
}
