//! Linecrypt - Passphrase-based line-oriented file encryption
//!
//! Each line of a plaintext file is independently encrypted with
//! AES-256 in counter mode under a PBKDF2-derived key, and the result
//! is persisted as a textual container: a decimal counter seed line, a
//! hex salt line, then one hex ciphertext line per plaintext line.

#![forbid(unsafe_code)]

pub mod cipher;
pub mod container;
pub mod error;
pub mod file_ops;
pub mod hexcodec;
pub mod kdf;
pub mod passphrase;
pub mod pipeline;
