//! In-memory page source.

use super::{FetchError, PageSource};
use crate::feed::{FeedContext, PageRequest};
use crate::model::{Cursor, Page};
use std::collections::{HashMap, VecDeque};

/// Serves pre-built pages per feed context, chained by cursor.
///
/// A request without a cursor gets the first page of its context; a request
/// with the `next_cursor` of page *i* gets page *i + 1*. Contexts without
/// pages serve a single empty terminal page.
#[derive(Debug, Default)]
pub struct MemoryPageSource {
    pages: HashMap<FeedContext, Vec<Page>>,
    injected_failures: VecDeque<FetchError>,
    requests: Vec<PageRequest>,
}

impl MemoryPageSource {
    /// Source with no pages; every context serves an empty terminal page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pages of `context`, in order.
    pub fn with_pages(mut self, context: FeedContext, pages: Vec<Page>) -> Self {
        self.pages.insert(context, pages);
        self
    }

    /// Makes the next request fail with `error`, regardless of its cursor.
    pub fn fail_next(&mut self, error: FetchError) {
        self.injected_failures.push_back(error);
    }

    /// Every request served so far, in order.
    pub fn requests(&self) -> &[PageRequest] {
        &self.requests
    }
}

impl PageSource for MemoryPageSource {
    fn fetch_page(&mut self, request: &PageRequest) -> Result<Page, FetchError> {
        self.requests.push(request.clone());
        if let Some(error) = self.injected_failures.pop_front() {
            return Err(error);
        }

        let Some(pages) = self.pages.get(&request.context) else {
            return Ok(Page::last(Vec::new()));
        };
        let index = page_index(pages.iter().map(|p| p.next_cursor.as_ref()), request.cursor.as_ref())?;
        Ok(pages.get(index).cloned().unwrap_or_default())
    }
}

/// Resolves a cursor against the `next_cursor`s of a page chain.
///
/// `None` addresses the first page; `Some(c)` addresses the page following
/// the one whose `next_cursor` is `c`.
pub(crate) fn page_index<'a>(
    next_cursors: impl Iterator<Item = Option<&'a Cursor>>,
    cursor: Option<&Cursor>,
) -> Result<usize, FetchError> {
    let Some(cursor) = cursor else {
        return Ok(0);
    };
    next_cursors
        .enumerate()
        .find(|(_, next)| *next == Some(cursor))
        .map(|(i, _)| i + 1)
        .ok_or_else(|| FetchError::UnknownCursor {
            cursor: cursor.to_string(),
        })
}
