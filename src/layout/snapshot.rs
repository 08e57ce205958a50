//! Serializable picture of a layout for render surfaces.

use super::engine::MasonryLayout;
use crate::model::{ItemId, MediaKind};
use serde::Serialize;

/// Everything a painter needs: column geometry and per-item rectangles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    /// Viewport width the layout was computed for.
    pub viewport_width: Option<u32>,
    /// Number of columns.
    pub column_count: usize,
    /// Width of every column, in pixels.
    pub column_width: f64,
    /// Items laid out across all columns.
    pub item_count: usize,
    /// Columns, left to right.
    pub columns: Vec<ColumnSnapshot>,
}

/// One column of a [`LayoutSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSnapshot {
    /// Column index, 0 being leftmost.
    pub index: usize,
    /// Left edge in pixels, container padding included.
    pub x: f64,
    /// Running height accumulator, gaps included.
    pub height: f64,
    /// Items top to bottom.
    pub items: Vec<PlacedItem>,
}

/// An item and where it sits inside its column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    /// Item id.
    pub id: ItemId,
    /// Media type.
    pub kind: MediaKind,
    /// Top edge in whole pixels.
    pub top: usize,
    /// Height in whole pixels, trailing gap included.
    pub height: usize,
    /// Whether the height comes from a measurement rather than an
    /// estimate.
    pub measured: bool,
    /// Display title, when the post has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl MasonryLayout {
    /// Captures column geometry and item rectangles for painting.
    pub fn snapshot(&self) -> LayoutSnapshot {
        let config = self.config();
        let stride = self.column_width() + config.height.gap;

        let columns = self
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| ColumnSnapshot {
                index,
                x: config.horizontal_padding + index as f64 * stride,
                height: column.height(),
                items: column
                    .items()
                    .iter()
                    .enumerate()
                    .filter_map(|(position, id)| {
                        let item = self.item(id)?;
                        Some(PlacedItem {
                            id: id.clone(),
                            kind: item.kind(),
                            top: column.top_of(position),
                            height: column.height_of(position),
                            measured: item.measured_height().is_some(),
                            title: item.meta().title.clone(),
                        })
                    })
                    .collect(),
            })
            .collect();

        LayoutSnapshot {
            viewport_width: self.viewport_width(),
            column_count: self.column_count(),
            column_width: self.column_width(),
            item_count: self.len(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    #[test]
    fn snapshot_positions_columns_and_items() {
        let mut layout = MasonryLayout::default();
        layout.set_viewport_width(800);
        layout.append(vec![
            Item::new(ItemId::new("a").unwrap(), MediaKind::Image).with_measured_height(100.0),
            Item::new(ItemId::new("b").unwrap(), MediaKind::Video),
        ]);

        let snap = layout.snapshot();

        assert_eq!(snap.column_count, 3);
        assert_eq!(snap.item_count, 2);
        assert_eq!(snap.columns[0].x, 0.0);
        assert_eq!(snap.columns[1].x, layout.column_width() + 16.0);
        assert_eq!(snap.columns[0].items[0].height, 116);
        assert!(snap.columns[0].items[0].measured);
        assert_eq!(snap.columns[1].items[0].kind, MediaKind::Video);
        assert!(snap.columns[2].items.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let layout = MasonryLayout::default();
        let json = serde_json::to_value(layout.snapshot()).unwrap();
        assert_eq!(json["column_count"], 1);
        assert_eq!(json["viewport_width"], serde_json::Value::Null);
    }
}
