//! A single masonry column.

use super::height_index::HeightIndex;
use crate::model::ItemId;

/// One column of the layout: its items in placement order, its running
/// height accumulator, and a pixel offset index for hit testing.
///
/// # Invariants
/// - `items.len() == offsets.len()`
/// - `items` is in global input order (placement only ever appends)
#[derive(Debug, Clone, Default)]
pub struct Column {
    items: Vec<ItemId>,
    height: f64,
    offsets: HeightIndex,
}

impl Column {
    /// Empty column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item with the given estimated height (gap included).
    pub(crate) fn push(&mut self, id: ItemId, height: f64) {
        self.items.push(id);
        self.height += height;
        self.offsets.push(to_pixels(height));
    }

    /// Adjusts the height of the item at `position` without moving it.
    pub(crate) fn adjust(&mut self, position: usize, old_height: f64, new_height: f64) {
        self.height += new_height - old_height;
        self.offsets.set(position, to_pixels(new_height));
    }

    /// Item ids in placement order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Running height accumulator in pixels, gaps included.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item has been placed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top offset (whole pixels) of the item at `position`.
    pub fn top_of(&self, position: usize) -> usize {
        self.offsets.top_of(position)
    }

    /// Height (whole pixels, gap included) of the item at `position`.
    pub fn height_of(&self, position: usize) -> usize {
        self.offsets.height(position)
    }

    /// Position of the item covering vertical offset `y`, if any.
    pub fn position_at(&self, y: usize) -> Option<usize> {
        self.offsets.lower_bound(y)
    }
}

/// Snaps a fractional height to whole pixels for the offset index.
fn to_pixels(height: f64) -> usize {
    if height.is_finite() && height > 0.0 {
        height.round() as usize
    } else {
        0
    }
}
