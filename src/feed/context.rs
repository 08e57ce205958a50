//! Feed contexts and page requests.

use crate::model::Cursor;
use std::fmt;

/// Which collection a feed surface is showing. Switching context replaces
/// the item collection wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FeedContext {
    /// The main feed.
    #[default]
    Home,
    /// A user's posts, by user id.
    Profile(String),
    /// Posts in a named category.
    Category(String),
    /// Results for a search query.
    Search(String),
}

impl fmt::Display for FeedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedContext::Home => f.write_str("home"),
            FeedContext::Profile(user) => write!(f, "profile:{user}"),
            FeedContext::Category(name) => write!(f, "category:{name}"),
            FeedContext::Search(query) => write!(f, "search:{query}"),
        }
    }
}

/// Parameters of one `fetchPage` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Collection being paged.
    pub context: FeedContext,
    /// `None` for the first page.
    pub cursor: Option<Cursor>,
    /// Items requested.
    pub page_size: usize,
}

/// Monotonic counter bumped on every context switch or refresh. Responses
/// tagged with an older generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_display() {
        assert_eq!(FeedContext::Home.to_string(), "home");
        assert_eq!(FeedContext::Profile("u1".into()).to_string(), "profile:u1");
        assert_eq!(FeedContext::Category("art".into()).to_string(), "category:art");
        assert_eq!(FeedContext::Search("cats".into()).to_string(), "search:cats");
    }

    #[test]
    fn generation_increases() {
        let g = Generation::default();
        assert!(g.next() > g);
        assert_eq!(g.next().get(), 1);
    }
}
