//! Feed surface state: pagination, context switching and resize handling
//! around the layout engine.

pub mod context;
pub mod debounce;
pub mod pagination;
pub mod session;

pub use context::{FeedContext, Generation, PageRequest};
pub use debounce::{ResizeDebouncer, DEFAULT_RESIZE_DEBOUNCE};
pub use pagination::{FetchTicket, Pagination};
pub use session::{FeedSession, FeedSettings, FetchOutcome, DEFAULT_PAGE_SIZE};
