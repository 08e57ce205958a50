//! Error types for the waterfall application.
//!
//! The layout engine itself is infallible: it performs no I/O and degrades to
//! type-default heights when information is missing. Everything that can fail
//! lives around it, and each concern gets its own `thiserror` enum:
//!
//! - [`AppError`] - top-level error returned from the CLI entry point
//!   - [`InputError`] - reading the pages file
//!   - [`FetchError`](crate::source::FetchError) - pagination source failures
//!     - [`ParseError`] - page JSON that cannot be parsed or normalized
//!   - [`ConfigError`](crate::config::ConfigError) - config file failures
//!
//! # Recovery Strategy
//!
//! A post that fails normalization is **non-fatal**: it is logged and skipped,
//! the rest of its page is laid out. A page that fails to fetch is reported to
//! the feed session, which clears its in-flight marker so the next sentinel
//! trigger retries. Input and config errors are fatal at startup.

use crate::config::ConfigError;
use crate::source::FetchError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// All domain-specific errors convert into `AppError` via `From`, so the
/// binary can propagate with `?`.
///
/// # Examples
///
/// ```no_run
/// use waterfall::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     let _pages = open_pages()?;
///     Ok(())
/// }
/// # fn open_pages() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the pages file.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// The pagination source failed.
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    /// The configuration file is unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors encountered when opening or reading the pages file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given pages file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use waterfall::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound { path: PathBuf::from("/tmp/missing.jsonl") };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Any other I/O failure while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing or normalizing API payloads.
///
/// `message` is the parser's rendered message rather than the
/// `serde_json::Error` itself, so the error stays `Clone + Eq` and can be
/// collected per page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A page response is not valid JSON (or not the expected shape).
    ///
    /// `line` is the 1-based line number when the page came from a JSON Lines
    /// file.
    #[error("Invalid JSON{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    InvalidJson {
        /// 1-based line number, if known.
        line: Option<usize>,
        /// Parser error message.
        message: String,
    },

    /// A post carries none of the id aliases, or an empty id.
    #[error("Post at index {index} has no id")]
    MissingId {
        /// Position of the post within its page.
        index: usize,
    },
}
