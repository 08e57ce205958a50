//! Drives a feed session to completion against a page source.
//!
//! This is the CLI's event loop with the events replaced by a loop: the
//! sentinel is considered visible until the feed is exhausted.

use crate::feed::{FeedSession, FetchOutcome};
use crate::source::{FetchError, PageSource};
use tracing::info;

/// What a full load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Pages applied to the layout.
    pub pages: usize,
    /// Items appended across those pages.
    pub items: usize,
    /// True when the feed ran out rather than hitting the page limit.
    pub exhausted: bool,
}

/// Pulls pages into `session` until the source runs dry or `max_pages` pages
/// have been applied.
///
/// # Errors
///
/// Returns the first `FetchError`; pages applied before it stay in the
/// layout.
pub fn load_all<S: PageSource + ?Sized>(
    session: &mut FeedSession,
    source: &mut S,
    max_pages: Option<usize>,
) -> Result<LoadSummary, FetchError> {
    let mut summary = LoadSummary::default();

    loop {
        if max_pages.is_some_and(|max| summary.pages >= max) {
            break;
        }
        match session.on_sentinel_visible(source) {
            None => {
                summary.exhausted = true;
                break;
            }
            Some(FetchOutcome::Applied { appended, .. }) => {
                summary.pages += 1;
                summary.items += appended;
            }
            Some(FetchOutcome::Failed(error)) => return Err(error),
            // Single-threaded loop: nothing can switch context mid-flight.
            Some(FetchOutcome::Discarded { .. }) => {}
        }
    }

    info!(
        pages = summary.pages,
        items = summary.items,
        exhausted = summary.exhausted,
        "Feed loaded"
    );
    Ok(summary)
}
