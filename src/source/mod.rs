//! Pagination sources.
//!
//! This module provides the `fetchPage` collaborator the feed session
//! drives:
//! - [`PageSource`] trait, the seam between the session and any backend
//! - [`FilePageSource`] for a JSON Lines file of recorded API responses
//! - [`MemoryPageSource`] for pages built in code

use crate::feed::PageRequest;
use crate::model::error::ParseError;
use crate::model::Page;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FilePageSource;
pub use memory::MemoryPageSource;

/// Errors a page source can report for a single request.
///
/// None of these are fatal to the feed: the session clears its in-flight
/// marker and the next sentinel trigger retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The cursor does not correspond to any page this source knows about.
    #[error("Unknown cursor: {cursor}")]
    UnknownCursor {
        /// The cursor that was requested.
        cursor: String,
    },

    /// The response could not be parsed.
    #[error("Malformed response: {0}")]
    Malformed(#[from] ParseError),

    /// The backend refused or failed the request.
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Produces pages for a feed context.
///
/// Implementations are synchronous: the caller resolves the page before
/// handing it to the layout.
pub trait PageSource {
    /// Fetches the page addressed by `request`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the page cannot be produced.
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError> {
        (**self).fetch_page(request)
    }
}

impl<S: PageSource + ?Sized> PageSource for Box<S> {
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError> {
        (**self).fetch_page(request)
    }
}
