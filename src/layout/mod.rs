//! Masonry layout engine.
//!
//! Pure in-process computation: no I/O, no failure modes. Owned by exactly
//! one feed surface; callers serialize access.

pub mod breakpoints;
pub mod column;
pub mod engine;
pub mod estimate;
pub mod height_index;
pub mod snapshot;
pub mod visible_range;

pub use breakpoints::{compute_column_count, Breakpoint, BreakpointError, Breakpoints};
pub use column::Column;
pub use engine::{distribute, Distribution, LayoutConfig, MasonryLayout, MeasureOutcome};
pub use estimate::{estimate_height, HeightParams};
pub use snapshot::{ColumnSnapshot, LayoutSnapshot, PlacedItem};
pub use visible_range::ColumnWindow;
