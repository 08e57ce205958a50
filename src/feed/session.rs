//! Feed session: the single owner of a layout and its pagination state.
//!
//! The layout engine is not generation-aware. The session is what makes
//! sure it is only ever fed live data: every fetch is tagged with the
//! generation it was issued under, and responses from an older generation
//! are dropped before they reach the engine.

use super::context::{FeedContext, Generation};
use super::debounce::ResizeDebouncer;
use super::pagination::{FetchTicket, Pagination};
use crate::layout::{LayoutConfig, MasonryLayout, MeasureOutcome};
use crate::model::{ItemId, Page};
use crate::source::{FetchError, PageSource};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Session tunables that are not layout geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    /// Items requested per page.
    pub page_size: usize,
    /// Quiet window before a resize is applied.
    pub resize_debounce: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            resize_debounce: super::debounce::DEFAULT_RESIZE_DEBOUNCE,
        }
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was appended to the layout.
    Applied {
        /// Items added to the layout.
        appended: usize,
        /// Whether another page may follow.
        has_more: bool,
    },
    /// The ticket predates the current generation; the page was dropped.
    Discarded {
        /// Generation the ticket was issued under.
        ticket: Generation,
        /// Generation the session is in now.
        current: Generation,
    },
    /// The source failed; the same cursor will be retried on the next
    /// trigger.
    Failed(FetchError),
}

/// Layout plus pagination for one feed surface.
#[derive(Debug)]
pub struct FeedSession {
    layout: MasonryLayout,
    pagination: Pagination,
    settings: FeedSettings,
    resize: ResizeDebouncer,
    last_error: Option<FetchError>,
}

impl FeedSession {
    /// Empty session for `context`; nothing is fetched until the first
    /// trigger.
    pub fn new(context: FeedContext, layout: LayoutConfig, settings: FeedSettings) -> Self {
        Self {
            layout: MasonryLayout::new(layout),
            pagination: Pagination::new(context),
            resize: ResizeDebouncer::new(settings.resize_debounce),
            settings,
            last_error: None,
        }
    }

    /// The owned layout engine.
    pub fn layout(&self) -> &MasonryLayout {
        &self.layout
    }

    /// Cursor and generation state.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Context currently shown.
    pub fn context(&self) -> &FeedContext {
        self.pagination.context()
    }

    /// Tunables the session was built with.
    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// The most recent fetch failure, cleared by the next success or reset.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Replaces the collection: tab, category or search change.
    ///
    /// The layout is reset before anything else can be appended, and every
    /// outstanding fetch becomes stale.
    pub fn switch_context(&mut self, context: FeedContext) -> Generation {
        self.layout.reset();
        self.last_error = None;
        let generation = self.pagination.reset(context);
        info!(context = %self.pagination.context(), %generation, "Switched feed context");
        generation
    }

    /// Reloads the current context from its first page.
    pub fn refresh(&mut self) -> Generation {
        let context = self.pagination.context().clone();
        self.switch_context(context)
    }

    /// Issues a ticket for the next page, or `None` if the feed is exhausted
    /// or a fetch is already in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let ticket = self.pagination.begin(self.settings.page_size)?;
        debug!(
            context = %ticket.request().context,
            cursor = ?ticket.request().cursor,
            generation = %ticket.generation(),
            "Fetching page"
        );
        Some(ticket)
    }

    /// Feeds a resolved fetch back into the session.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page, FetchError>,
    ) -> FetchOutcome {
        if !self.pagination.is_current(&ticket) {
            debug!(
                ticket = %ticket.generation(),
                current = %self.pagination.generation(),
                "Discarding stale page"
            );
            return FetchOutcome::Discarded {
                ticket: ticket.generation(),
                current: self.pagination.generation(),
            };
        }

        match result {
            Ok(page) => {
                self.pagination.advance(&page);
                self.last_error = None;
                let appended = self.layout.append(page.items);
                FetchOutcome::Applied {
                    appended,
                    has_more: self.pagination.has_more(),
                }
            }
            Err(error) => {
                warn!(context = %self.pagination.context(), %error, "Page fetch failed");
                self.pagination.fail();
                self.last_error = Some(error.clone());
                FetchOutcome::Failed(error)
            }
        }
    }

    /// Infinite-scroll trigger: the sentinel at the end of the rendered
    /// content became visible. Fetches and applies one page synchronously.
    ///
    /// Returns `None` when there is nothing to fetch.
    pub fn on_sentinel_visible<S: PageSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Option<FetchOutcome> {
        let ticket = self.begin_fetch()?;
        let result = source.fetch_page(ticket.request());
        Some(self.complete_fetch(ticket, result))
    }

    /// Applies a viewport width immediately. Returns whether the layout was
    /// recomputed.
    pub fn set_viewport_width(&mut self, width: u32) -> bool {
        self.layout.set_viewport_width(width)
    }

    /// Records a raw resize event; applied by [`FeedSession::poll_resize`]
    /// once the debounce window has passed.
    pub fn on_viewport_resized(&mut self, width: u32, now: Instant) {
        self.resize.observe(width, now);
    }

    /// Applies a pending resize if its quiet window has elapsed. Returns
    /// whether the layout was recomputed.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        match self.resize.poll(now) {
            Some(width) => self.layout.set_viewport_width(width),
            None => false,
        }
    }

    /// Render surface callback: an item reported its real height.
    pub fn on_item_measured(&mut self, id: &ItemId, actual_height: f64) -> MeasureOutcome {
        self.layout.on_item_measured(id, actual_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cursor, Item, MediaKind};
    use crate::source::MemoryPageSource;

    fn items(prefix: &str, n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(ItemId::new(format!("{prefix}{i}")).unwrap(), MediaKind::Image))
            .collect()
    }

    fn page(prefix: &str, n: usize, next: Option<&str>) -> Page {
        let next_cursor = next.and_then(Cursor::new);
        Page::new(items(prefix, n), next_cursor.is_some(), next_cursor)
    }

    fn session() -> FeedSession {
        FeedSession::new(FeedContext::Home, LayoutConfig::default(), FeedSettings::default())
    }

    #[test]
    fn sentinel_loads_pages_until_exhausted() {
        let mut source = MemoryPageSource::new().with_pages(
            FeedContext::Home,
            vec![page("a", 3, Some("c1")), page("b", 2, None)],
        );
        let mut feed = session();

        assert_eq!(
            feed.on_sentinel_visible(&mut source),
            Some(FetchOutcome::Applied {
                appended: 3,
                has_more: true
            })
        );
        assert_eq!(
            feed.on_sentinel_visible(&mut source),
            Some(FetchOutcome::Applied {
                appended: 2,
                has_more: false
            })
        );
        assert_eq!(feed.on_sentinel_visible(&mut source), None);
        assert_eq!(feed.layout().len(), 5);
    }

    #[test]
    fn stale_page_after_context_switch_is_discarded() {
        let mut feed = session();
        let stale = feed.begin_fetch().unwrap();

        feed.switch_context(FeedContext::Category("art".into()));
        let outcome = feed.complete_fetch(stale, Ok(page("old", 4, None)));

        assert!(matches!(outcome, FetchOutcome::Discarded { .. }));
        assert!(feed.layout().is_empty());
        // The new context can still fetch.
        assert!(feed.begin_fetch().is_some());
    }

    #[test]
    fn switch_context_resets_layout() {
        let mut source =
            MemoryPageSource::new().with_pages(FeedContext::Home, vec![page("a", 3, None)]);
        let mut feed = session();
        feed.set_viewport_width(1600);
        feed.on_sentinel_visible(&mut source);
        assert_eq!(feed.layout().len(), 3);

        feed.switch_context(FeedContext::Search("cats".into()));

        assert!(feed.layout().is_empty());
        assert_eq!(feed.layout().column_count(), 4);
        assert!(feed.layout().column_heights().iter().all(|&h| h == 0.0));
        assert_eq!(feed.context(), &FeedContext::Search("cats".into()));
    }

    #[test]
    fn failure_is_retried_on_next_trigger() {
        let mut source =
            MemoryPageSource::new().with_pages(FeedContext::Home, vec![page("a", 2, None)]);
        source.fail_next(FetchError::Unavailable("timeout".into()));
        let mut feed = session();

        let outcome = feed.on_sentinel_visible(&mut source).unwrap();
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(feed.last_error().is_some());

        let outcome = feed.on_sentinel_visible(&mut source).unwrap();
        assert!(matches!(outcome, FetchOutcome::Applied { appended: 2, .. }));
        assert!(feed.last_error().is_none());
        assert_eq!(source.requests()[0], source.requests()[1]);
    }

    #[test]
    fn refresh_starts_from_first_page() {
        let mut source = MemoryPageSource::new().with_pages(
            FeedContext::Home,
            vec![page("a", 1, Some("c1")), page("b", 1, None)],
        );
        let mut feed = session();
        feed.on_sentinel_visible(&mut source);
        feed.on_sentinel_visible(&mut source);

        feed.refresh();
        feed.on_sentinel_visible(&mut source);

        assert_eq!(feed.layout().len(), 1);
        assert_eq!(feed.layout().items()[0].id().as_str(), "a0");
        assert_eq!(source.requests().last().unwrap().cursor, None);
    }

    #[test]
    fn debounced_resize_applies_after_quiet_window() {
        let mut feed = session();
        let start = Instant::now();

        feed.on_viewport_resized(700, start);
        feed.on_viewport_resized(1600, start + Duration::from_millis(100));

        assert!(!feed.poll_resize(start + Duration::from_millis(200)));
        assert_eq!(feed.layout().column_count(), 1);

        assert!(feed.poll_resize(start + Duration::from_millis(300)));
        assert_eq!(feed.layout().column_count(), 4);
    }

    #[test]
    fn measurement_passes_through() {
        let mut feed = session();
        let ticket = feed.begin_fetch().unwrap();
        feed.complete_fetch(ticket, Ok(page("a", 1, None)));

        let outcome = feed.on_item_measured(&ItemId::new("a0").unwrap(), 999.0);
        assert_eq!(outcome, MeasureOutcome::Relaid);
    }
}
