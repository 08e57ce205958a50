//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors. The
//! [`api`] submodule is the only place that knows about raw API shapes.

pub mod api;
pub mod error;
pub mod identifiers;
pub mod item;
pub mod page;

// Re-export for convenience
pub use api::{parse_page, RawPage, RawPost};
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{Cursor, InvalidItemId, ItemId};
pub use item::{DeclaredSize, Item, ItemMeta, MediaKind};
pub use page::Page;
