//! A page of feed items as returned by the pagination source.

use super::identifiers::Cursor;
use super::item::Item;

/// One resolved `fetchPage` response in canonical form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Items in server order.
    pub items: Vec<Item>,
    /// Whether the server reports further pages.
    pub has_more: bool,
    /// Cursor for the following page.
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Page from its parts.
    pub fn new(items: Vec<Item>, has_more: bool, next_cursor: Option<Cursor>) -> Self {
        Self {
            items,
            has_more,
            next_cursor,
        }
    }

    /// A terminal page: no further pages follow it.
    pub fn last(items: Vec<Item>) -> Self {
        Self::new(items, false, None)
    }
}
