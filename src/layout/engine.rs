//! Greedy shortest-column masonry layout.
//!
//! The engine owns the item list and the column assignment. Placement is a
//! single left-to-right pass: each item goes to the column with the smallest
//! running height, ties to the leftmost column. A placement is never revised
//! except by a full recompute, which happens on
//! - a column count or column width change,
//! - [`MasonryLayout::distribute`] with a fresh item list,
//! - a measurement outside the dead band.
//!
//! Appends lay out only the new items on top of the existing heights.

use super::breakpoints::Breakpoints;
use super::column::Column;
use super::estimate::{estimate_height, HeightParams};
use crate::model::{Item, ItemId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Relative change below which a new measurement does not move anything.
pub const DEFAULT_DEAD_BAND: f64 = 0.05;

/// Static configuration of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Viewport width to column count table.
    pub breakpoints: Breakpoints,
    /// Gap and chrome used by height estimates.
    pub height: HeightParams,
    /// Padding on each side of the container, in pixels.
    pub horizontal_padding: f64,
    /// Relative dead band for [`MasonryLayout::on_item_measured`].
    pub dead_band: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            height: HeightParams::default(),
            horizontal_padding: 0.0,
            dead_band: DEFAULT_DEAD_BAND,
        }
    }
}

/// What a measurement did to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureOutcome {
    /// No item with that id is laid out.
    UnknownItem,
    /// Recorded; within the dead band, so every item stayed in its column.
    Absorbed,
    /// Outside the dead band; the whole list was redistributed.
    Relaid,
}

/// Result of the pure [`distribute`] pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// Item ids per column, in placement order.
    pub columns: Vec<Vec<ItemId>>,
    /// Final accumulator of each column.
    pub column_heights: Vec<f64>,
}

/// Where an item currently sits, and the height it was placed with.
#[derive(Debug, Clone, Copy)]
struct Slot {
    index: usize,
    column: usize,
    position: usize,
    assumed: f64,
}

/// Masonry layout state for one feed surface.
#[derive(Debug, Clone)]
pub struct MasonryLayout {
    config: LayoutConfig,
    viewport_width: Option<u32>,
    column_width: f64,
    items: Vec<Item>,
    slots: HashMap<ItemId, Slot>,
    columns: Vec<Column>,
}

impl MasonryLayout {
    /// Creates an empty layout. Until a viewport is set the engine runs with
    /// a single zero-width column.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            viewport_width: None,
            column_width: 0.0,
            items: Vec::new(),
            slots: HashMap::new(),
            columns: vec![Column::new()],
        }
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Last viewport width applied, if any.
    pub fn viewport_width(&self) -> Option<u32> {
        self.viewport_width
    }

    /// Current number of columns. Never zero.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Current column width in pixels.
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Columns, left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Running height of every column, left to right.
    pub fn column_heights(&self) -> Vec<f64> {
        self.columns.iter().map(Column::height).collect()
    }

    /// Items in global input order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks up a laid out item by id.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.slots.get(id).map(|slot| &self.items[slot.index])
    }

    /// Column index and position within that column of `id`.
    pub fn placement(&self, id: &ItemId) -> Option<(usize, usize)> {
        self.slots.get(id).map(|slot| (slot.column, slot.position))
    }

    /// Number of laid out items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item is laid out.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies a (debounced) viewport width.
    ///
    /// Recomputes the column count from the breakpoint table and the column
    /// width from the container. Any change to either recreates the columns
    /// and redistributes every item. Returns whether a relayout happened.
    pub fn set_viewport_width(&mut self, viewport_width: u32) -> bool {
        let count = self.config.breakpoints.column_count(viewport_width);
        let width = column_width_for(viewport_width, count, &self.config);
        self.viewport_width = Some(viewport_width);

        let changed = count != self.columns.len() || width != self.column_width;
        if changed {
            debug!(
                viewport_width,
                columns = count,
                column_width = width,
                "Viewport change, recomputing layout"
            );
            self.column_width = width;
            self.rebuild(count);
        }
        changed
    }

    /// Forces a column count, bypassing the breakpoint table. Zero is treated
    /// as one.
    pub fn set_column_count(&mut self, column_count: usize) {
        let count = column_count.max(1);
        if count != self.columns.len() {
            self.rebuild(count);
        }
    }

    /// Forces a column width, bypassing the viewport computation.
    pub fn set_column_width(&mut self, column_width: f64) {
        let width = column_width.max(0.0);
        if width != self.column_width {
            self.column_width = width;
            self.rebuild(self.columns.len());
        }
    }

    /// Replaces the item list and lays it out from scratch.
    pub fn distribute(&mut self, items: Vec<Item>) {
        self.items = items;
        self.rebuild(self.columns.len());
    }

    /// Lays out newly arrived items on top of the existing column heights.
    /// Previously placed items do not move.
    pub fn append(&mut self, new_items: impl IntoIterator<Item = Item>) -> usize {
        let start = self.items.len();
        self.items.extend(new_items);
        for index in start..self.items.len() {
            self.place(index);
        }

        let appended = self.items.len() - start;
        debug!(
            appended,
            total = self.items.len(),
            heights = ?self.column_heights(),
            "Appended items"
        );
        appended
    }

    /// Drops every item and zeroes every column.
    pub fn reset(&mut self) {
        let count = self.columns.len();
        self.items.clear();
        self.slots.clear();
        self.columns = vec![Column::new(); count];
        debug!(columns = count, "Layout reset");
    }

    /// Records the rendered height of `id`.
    ///
    /// If `actual_height + gap` differs from the height the item is currently
    /// assumed to have by more than the dead band (relative), the whole list
    /// is redistributed with best-known heights. Otherwise nothing moves; the
    /// owning column's accumulator absorbs the difference.
    pub fn on_item_measured(&mut self, id: &ItemId, actual_height: f64) -> MeasureOutcome {
        let Some(slot) = self.slots.get(id).copied() else {
            debug!(%id, "Measurement for unknown item ignored");
            return MeasureOutcome::UnknownItem;
        };

        let item = &mut self.items[slot.index];
        item.set_measured_height(actual_height);
        let measured = estimate_height(item, self.column_width, &self.config.height);

        if exceeds_dead_band(slot.assumed, measured, self.config.dead_band) {
            debug!(
                %id,
                assumed = slot.assumed,
                measured,
                "Measurement outside dead band, redistributing"
            );
            self.rebuild(self.columns.len());
            MeasureOutcome::Relaid
        } else {
            trace!(%id, assumed = slot.assumed, measured, "Measurement absorbed");
            self.columns[slot.column].adjust(slot.position, slot.assumed, measured);
            if let Some(slot) = self.slots.get_mut(id) {
                slot.assumed = measured;
            }
            MeasureOutcome::Absorbed
        }
    }

    /// Recreates `count` empty columns and places every item again.
    fn rebuild(&mut self, count: usize) {
        self.slots.clear();
        self.columns = vec![Column::new(); count];
        for index in 0..self.items.len() {
            self.place(index);
        }
    }

    fn place(&mut self, index: usize) {
        let item = &self.items[index];
        let height = estimate_height(item, self.column_width, &self.config.height);
        let column = shortest_column(self.columns.iter().map(Column::height));
        let position = self.columns[column].len();
        let id = item.id().clone();

        trace!(%id, column, height, "Placed item");
        self.columns[column].push(id.clone(), height);
        self.slots.insert(
            id,
            Slot {
                index,
                column,
                position,
                assumed: height,
            },
        );
    }
}

impl Default for MasonryLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Pure greedy distribution of `items` over `column_count` columns.
///
/// Same algorithm the engine uses, without any retained state. A column
/// count of zero is treated as one.
pub fn distribute(
    items: &[Item],
    column_count: usize,
    column_width: f64,
    params: &HeightParams,
) -> Distribution {
    let count = column_count.max(1);
    let mut columns = vec![Vec::new(); count];
    let mut column_heights = vec![0.0; count];

    for item in items {
        let column = shortest_column(column_heights.iter().copied());
        columns[column].push(item.id().clone());
        column_heights[column] += estimate_height(item, column_width, params);
    }

    Distribution {
        columns,
        column_heights,
    }
}

/// Index of the smallest height; the leftmost wins ties.
fn shortest_column(heights: impl Iterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_height = f64::INFINITY;
    for (i, h) in heights.enumerate() {
        if h < best_height {
            best = i;
            best_height = h;
        }
    }
    best
}

fn exceeds_dead_band(assumed: f64, measured: f64, dead_band: f64) -> bool {
    (measured - assumed).abs() > dead_band * assumed.abs()
}

fn column_width_for(viewport_width: u32, column_count: usize, config: &LayoutConfig) -> f64 {
    let count = column_count.max(1) as f64;
    let inner = f64::from(viewport_width) - 2.0 * config.horizontal_padding;
    let gaps = config.height.gap * (count - 1.0);
    ((inner - gaps) / count).max(0.0)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
