//! Error types for typedrill-core.

use thiserror::Error;

use crate::constants::{BACKSPACE, BACKSPACE_DISPLAY};

/// Main error type for comparison runs.
///
/// Stream exhaustion and deadline expiry are normal terminations, not
/// errors; they are reported through
/// [`CloseReason`](crate::comparison::CloseReason).
#[derive(Debug, Error)]
pub enum Error {
    /// The model stream produced a character that cannot be typed.
    #[error("the model stream contained an untypeable character: '{}'", display_rune(*ch))]
    IllegalModelCharacter {
        /// The offending code point.
        ch: char,
    },

    /// Failed to install the logging subscriber.
    #[error("logging setup failed: {0}")]
    Logging(String),

    /// I/O error from underlying system calls (log file handling).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an illegal-model-character error for the given code point.
    pub fn illegal_model_character(ch: char) -> Self {
        Error::IllegalModelCharacter { ch }
    }

    /// Returns true if this error aborts a comparison run.
    ///
    /// Fatal errors are surfaced to the caller; there is nothing to retry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::IllegalModelCharacter { .. })
    }
}

/// Render a code point for display, substituting a visible placeholder for
/// the backspace sentinel.
fn display_rune(ch: char) -> char {
    if ch == BACKSPACE { BACKSPACE_DISPLAY } else { ch }
}

/// Convenience result type for typedrill operations.
pub type Result<T> = std::result::Result<T, Error>;
