use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Any failure that cannot be confidently attributed to the user's
    /// input or actions.
    ///
    /// Use of Internal is never a guarantee the error is not, for
    /// example, due to a user error - merely that it cannot be
    /// confidently determined by the code.
    Internal,

    /// The user provided invalid input or performed an action that is
    /// unsupported or impossible to complete.
    User,
}

/// Condition flags for consumers that want to branch on failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A hex-encoded field (salt or ciphertext line) is malformed:
    /// odd length or non-hex characters.
    HexDecode,
    /// The container header is invalid: the counter seed line is not a
    /// decimal integer, exceeds 256 bits, or the salt has the wrong
    /// length.
    HeaderFormat,
    /// The container has fewer lines than the two-line header requires.
    ContainerTruncated,
    /// Decrypted bytes are not valid UTF-8 text. The usual cause is an
    /// incorrect passphrase; corrupted ciphertext looks identical. This
    /// is a heuristic, not an authenticity check.
    NotText,
    /// Low-level PBKDF2 key derivation failed.
    KeyDerivation,
    /// Passphrase could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// Interaction with the filesystem, stdin/stdout, or other I/O
    /// failed. Covers a missing input file.
    Io,
}

impl ErrorKind {
    /// Broad category implied by the kind alone.
    ///
    /// `Io` defaults to Internal; construction sites that know better
    /// (e.g. a missing user-named input file) override the category.
    pub fn default_category(self) -> ErrorCategory {
        match self {
            ErrorKind::HexDecode
            | ErrorKind::HeaderFormat
            | ErrorKind::ContainerTruncated
            | ErrorKind::NotText
            | ErrorKind::PassphraseUnavailable => ErrorCategory::User,
            ErrorKind::KeyDerivation | ErrorKind::Io => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct LinecryptError {
    /// Specific condition tag, always provided.
    pub kind: ErrorKind,
    /// Broad error category.
    pub category: ErrorCategory,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl LinecryptError {
    /// Creates a new error with a required kind and display message.
    /// The category is derived from the kind.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            category: kind.default_category(),
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates a new error that retains the originating source error.
    pub fn with_source(
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            category: kind.default_category(),
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    /// Overrides the derived category.
    pub fn categorized(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the preserved source error if present.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Wraps the current error with a higher-level message while
    /// preserving kind, category, and the original error as source.
    pub fn with_context(self, msg: impl Into<String>) -> Self {
        let kind = self.kind;
        let category = self.category;
        Self {
            kind,
            category,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LinecryptError>;
