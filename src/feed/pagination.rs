//! Cursor pagination state for one feed context.

use super::context::{FeedContext, Generation, PageRequest};
use crate::model::{Cursor, Page};
use std::collections::HashSet;
use tracing::warn;

/// A fetch the session has handed out and not yet seen completed.
///
/// Carries the generation it was issued under; the response is discarded if
/// the session has moved on by the time it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: Generation,
    request: PageRequest,
}

impl FetchTicket {
    /// Generation the ticket was issued under.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Request to hand to the page source.
    pub fn request(&self) -> &PageRequest {
        &self.request
    }
}

/// Cursor, has-more flag and in-flight marker for the current context.
///
/// # Invariants
/// - At most one fetch is in flight.
/// - `has_more == false` is terminal until the next reset.
/// - A cursor is followed at most once per generation.
#[derive(Debug, Clone)]
pub struct Pagination {
    context: FeedContext,
    generation: Generation,
    cursor: Option<Cursor>,
    followed: HashSet<Cursor>,
    has_more: bool,
    in_flight: bool,
    pages_loaded: usize,
}

impl Pagination {
    /// Fresh pagination for `context`, positioned before the first page.
    pub fn new(context: FeedContext) -> Self {
        Self {
            context,
            generation: Generation::default(),
            cursor: None,
            followed: HashSet::new(),
            has_more: true,
            in_flight: false,
            pages_loaded: 0,
        }
    }

    /// Context the pages belong to.
    pub fn context(&self) -> &FeedContext {
        &self.context
    }

    /// Current generation; tickets from older ones are stale.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Cursor the next request will carry. `None` before the first page.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Whether another page may be requested.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a ticket is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Pages applied since the last reset.
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Starts over in `context` under a fresh generation. Any in-flight
    /// fetch becomes stale.
    pub fn reset(&mut self, context: FeedContext) -> Generation {
        let generation = self.generation.next();
        *self = Self {
            generation,
            ..Self::new(context)
        };
        generation
    }

    /// Issues a ticket for the next page, unless exhausted or busy.
    pub fn begin(&mut self, page_size: usize) -> Option<FetchTicket> {
        if !self.has_more || self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(FetchTicket {
            generation: self.generation,
            request: PageRequest {
                context: self.context.clone(),
                cursor: self.cursor.clone(),
                page_size,
            },
        })
    }

    /// Whether a ticket still belongs to the current generation.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Advances past a successfully applied page.
    pub fn advance(&mut self, page: &Page) {
        self.in_flight = false;
        self.pages_loaded += 1;
        self.cursor = page.next_cursor.clone();
        self.has_more = page.has_more;
        if !page.has_more {
            return;
        }

        match &page.next_cursor {
            // Without a cursor the next request would re-fetch the first page.
            None => {
                warn!(context = %self.context, "Page claims more results but carries no cursor; stopping");
                self.has_more = false;
            }
            Some(cursor) => {
                if !self.followed.insert(cursor.clone()) {
                    warn!(
                        context = %self.context,
                        %cursor,
                        "Page repeats an already followed cursor; stopping"
                    );
                    self.has_more = false;
                }
            }
        }
    }

    /// Clears the in-flight marker after a failure so the next trigger
    /// retries the same cursor.
    pub fn fail(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(next: Option<&str>, has_more: bool) -> Page {
        Page::new(Vec::new(), has_more, next.and_then(Cursor::new))
    }

    #[test]
    fn single_fetch_in_flight() {
        let mut p = Pagination::new(FeedContext::Home);
        assert!(p.begin(20).is_some());
        assert!(p.begin(20).is_none());
    }

    #[test]
    fn first_request_has_no_cursor() {
        let mut p = Pagination::new(FeedContext::Category("art".into()));
        let ticket = p.begin(12).unwrap();
        assert_eq!(ticket.request().cursor, None);
        assert_eq!(ticket.request().page_size, 12);
        assert_eq!(ticket.request().context, FeedContext::Category("art".into()));
    }

    #[test]
    fn advance_carries_cursor() {
        let mut p = Pagination::new(FeedContext::Home);
        p.begin(20).unwrap();
        p.advance(&page(Some("c2"), true));

        let ticket = p.begin(20).unwrap();
        assert_eq!(ticket.request().cursor.as_ref().unwrap().as_str(), "c2");
        assert_eq!(p.pages_loaded(), 1);
    }

    #[test]
    fn exhausted_after_last_page() {
        let mut p = Pagination::new(FeedContext::Home);
        p.begin(20).unwrap();
        p.advance(&page(None, false));
        assert!(!p.has_more());
        assert!(p.begin(20).is_none());
    }

    #[test]
    fn has_more_without_cursor_stops() {
        let mut p = Pagination::new(FeedContext::Home);
        p.begin(20).unwrap();
        p.advance(&page(None, true));
        assert!(!p.has_more());
    }

    #[test]
    fn repeated_cursor_stops() {
        let mut p = Pagination::new(FeedContext::Home);
        p.begin(20).unwrap();
        p.advance(&page(Some("p2"), true));
        p.begin(20).unwrap();
        p.advance(&page(Some("p2"), true));

        assert!(!p.has_more());
        assert!(p.begin(20).is_none());
        assert_eq!(p.pages_loaded(), 2);
    }

    #[test]
    fn cursor_cycle_stops_at_first_repeat() {
        let mut p = Pagination::new(FeedContext::Home);
        for next in ["a", "b", "c"] {
            p.begin(20).unwrap();
            p.advance(&page(Some(next), true));
            assert!(p.has_more());
        }
        p.begin(20).unwrap();
        p.advance(&page(Some("a"), true));
        assert!(!p.has_more());
    }

    #[test]
    fn reset_forgets_followed_cursors() {
        let mut p = Pagination::new(FeedContext::Home);
        p.begin(20).unwrap();
        p.advance(&page(Some("p2"), true));
        p.reset(FeedContext::Home);

        p.begin(20).unwrap();
        p.advance(&page(Some("p2"), true));
        assert!(p.has_more());
    }

    #[test]
    fn reset_invalidates_outstanding_ticket() {
        let mut p = Pagination::new(FeedContext::Home);
        let ticket = p.begin(20).unwrap();
        p.reset(FeedContext::Search("dogs".into()));

        assert!(!p.is_current(&ticket));
        assert!(!p.is_in_flight());
        assert!(p.has_more());
        assert_eq!(p.context(), &FeedContext::Search("dogs".into()));
    }

    #[test]
    fn failure_allows_retry_with_same_cursor() {
        let mut p = Pagination::new(FeedContext::Home);
        let first = p.begin(20).unwrap();
        p.fail();
        let retry = p.begin(20).unwrap();
        assert_eq!(first.request(), retry.request());
        assert_eq!(first.generation(), retry.generation());
    }
}
