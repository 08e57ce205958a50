//! Per-column visible window calculation

use super::engine::MasonryLayout;

/// Positions of one column that intersect the viewport.
///
/// Computed via binary search on the column's offset index.
///
/// # Invariants
/// - `start <= end`
/// - `end <= column.len()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnWindow {
    /// Column index.
    pub column: usize,
    /// First visible position (inclusive).
    pub start: usize,
    /// Last visible position (exclusive).
    pub end: usize,
}

impl ColumnWindow {
    /// Number of visible positions.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when nothing in the column is visible.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `position` falls inside the window.
    pub fn contains(&self, position: usize) -> bool {
        (self.start..self.end).contains(&position)
    }

    /// Visible positions, top to bottom.
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        self.start..self.end
    }
}

impl MasonryLayout {
    /// Which items of each column are visible in the pixel window
    /// `[scroll_top, scroll_top + viewport_height)`.
    ///
    /// Returns one window per column, in column order.
    pub fn visible_windows(&self, scroll_top: usize, viewport_height: usize) -> Vec<ColumnWindow> {
        self.columns()
            .iter()
            .enumerate()
            .map(|(column, col)| {
                if viewport_height == 0 {
                    return ColumnWindow {
                        column,
                        start: 0,
                        end: 0,
                    };
                }
                let start = col.position_at(scroll_top).unwrap_or(col.len());
                let bottom = scroll_top.saturating_add(viewport_height - 1);
                let end = col
                    .position_at(bottom)
                    .map_or(col.len(), |position| position + 1)
                    .max(start);
                ColumnWindow { column, start, end }
            })
            .collect()
    }

    /// True when the window reaches within `threshold` pixels of the end of
    /// the shortest column, which is where the infinite-scroll sentinel
    /// sits.
    pub fn near_end(&self, scroll_top: usize, viewport_height: usize, threshold: usize) -> bool {
        let shortest = self
            .columns()
            .iter()
            .map(|col| col.height().max(0.0).round() as usize)
            .min()
            .unwrap_or(0);
        scroll_top
            .saturating_add(viewport_height)
            .saturating_add(threshold)
            >= shortest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::LayoutConfig;
    use crate::layout::estimate::HeightParams;
    use crate::model::{Item, ItemId, MediaKind};

    fn layout_with(heights: &[f64], columns: usize) -> MasonryLayout {
        let mut layout = MasonryLayout::new(LayoutConfig {
            height: HeightParams {
                gap: 0.0,
                content_chrome_height: 0.0,
            },
            ..LayoutConfig::default()
        });
        layout.set_column_count(columns);
        layout.append(heights.iter().enumerate().map(|(i, &h)| {
            Item::new(ItemId::new(format!("i{i}")).unwrap(), MediaKind::Other)
                .with_measured_height(h)
        }));
        layout
    }

    #[test]
    fn window_covers_partially_visible_items() {
        // single column: [0..100) [100..200) [200..300)
        let layout = layout_with(&[100.0, 100.0, 100.0], 1);
        let windows = layout.visible_windows(50, 100);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0], ColumnWindow { column: 0, start: 0, end: 2 });
        assert_eq!(windows[0].len(), 2);
    }

    #[test]
    fn bottom_edge_on_boundary_excludes_next_item() {
        let layout = layout_with(&[100.0, 100.0, 100.0], 1);
        let windows = layout.visible_windows(0, 100);
        assert_eq!(windows[0], ColumnWindow { column: 0, start: 0, end: 1 });
    }

    #[test]
    fn window_past_the_end_is_empty() {
        let layout = layout_with(&[100.0, 100.0], 1);
        let windows = layout.visible_windows(500, 100);
        assert!(windows[0].is_empty());
        assert_eq!(windows[0].start, 2);
    }

    #[test]
    fn one_window_per_column() {
        let layout = layout_with(&[100.0, 50.0, 50.0, 50.0], 2);
        let windows = layout.visible_windows(0, 60);
        assert_eq!(windows.len(), 2);
        assert!(windows[0].contains(0));
        assert_eq!(windows[1].positions().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn zero_height_viewport_sees_nothing() {
        let layout = layout_with(&[100.0], 1);
        assert!(layout.visible_windows(0, 0)[0].is_empty());
    }

    #[test]
    fn extreme_scroll_offsets_saturate() {
        let layout = layout_with(&[100.0, 100.0], 1);

        let windows = layout.visible_windows(usize::MAX, usize::MAX);
        assert!(windows[0].is_empty());
        assert!(layout.near_end(usize::MAX, usize::MAX, usize::MAX));
        assert!(layout.near_end(0, usize::MAX, 1));
    }

    #[test]
    fn near_end_uses_shortest_column() {
        let layout = layout_with(&[1000.0, 200.0], 2);
        assert!(!layout.near_end(0, 100, 50));
        assert!(layout.near_end(0, 100, 100));
    }
}
