//! Error types and result type for the OED crate.
//!
//! This module defines all error variants that can occur when opening an OED
//! archive or reading entries from it. It uses the `snafu` library for
//! ergonomic error handling with automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use oed::{OedError, Result};
//!
//! fn find_word(word: &str) -> Result<String> {
//!     Err(OedError::not_found(word))
//! }
//!
//! match find_word("zzz") {
//!     Ok(text) => println!("{}", text),
//!     Err(e) if e.is_not_found() => println!("no such word"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! # Error Variants
//!
//! - [`OedError::ConfigurationMissing`]: No data/index paths could be resolved
//! - [`OedError::ResourceUnavailable`]: A configured file cannot be opened
//! - [`OedError::InvalidConfig`]: A configuration file is not valid JSON
//! - [`OedError::NotFound`]: A word lookup found nothing
//! - [`OedError::Io`]: Seek/read failure during an otherwise valid operation
//! - [`OedError::InvalidParameter`]: Invalid function or tool parameters
//! - [`OedError::GeneralError`]: Anything else

use std::io;
use std::path::PathBuf;

use snafu::{Backtrace, Snafu};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the OED crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum OedError {
    /// Neither the environment nor any configuration file named both archive paths.
    #[snafu(display("Configuration missing: {message}"))]
    ConfigurationMissing {
        message: String,
        backtrace: Backtrace,
    },

    /// A configured archive file does not exist or cannot be opened.
    #[snafu(display("Resource unavailable at {}: {source}", path.display()))]
    ResourceUnavailable {
        path: PathBuf,
        source: io::Error,
        backtrace: Backtrace,
    },

    /// A configuration file exists but could not be parsed.
    #[snafu(display("Invalid config file {}: {source}", path.display()))]
    InvalidConfig {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The word has no usable record in the index.
    #[snafu(display("Word not found: {word}"))]
    NotFound {
        word: String,
        backtrace: Backtrace,
    },

    /// I/O error while seeking or reading an open archive file.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// General error that doesn't fit other categories.
    #[snafu(display("General error: {message}"))]
    GeneralError {
        message: String,
        backtrace: Backtrace,
    },
}

impl From<io::Error> for OedError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

/// Helper methods for creating errors without context providers.
impl OedError {
    /// Creates a `ConfigurationMissing` error with the given message.
    pub fn configuration_missing<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationMissing {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `NotFound` error for the given word.
    ///
    /// # Examples
    ///
    /// ```
    /// use oed::OedError;
    ///
    /// let error = OedError::not_found("zzz_not_a_real_word");
    /// assert!(error.is_not_found());
    /// ```
    pub fn not_found<S: Into<String>>(word: S) -> Self {
        Self::NotFound {
            word: word.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error with the given message.
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `GeneralError` with the given message.
    pub fn general_error<S: Into<String>>(message: S) -> Self {
        Self::GeneralError {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is a `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, OedError::NotFound { .. })
    }
}

/// A specialized `Result` type for OED operations.
pub type Result<T> = std::result::Result<T, OedError>;
