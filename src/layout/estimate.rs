//! Height estimation for items that have not rendered yet.

use crate::model::Item;

/// Calibrated constants that feed height estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightParams {
    /// Vertical gap below every item, in pixels.
    pub gap: f64,
    /// Estimated height of the non-media chrome under an item (title, author
    /// row). A calibration constant, never measured.
    pub content_chrome_height: f64,
}

impl HeightParams {
    /// Vertical gap between items, in pixels.
    pub const DEFAULT_GAP: f64 = 16.0;
    /// Title and author block under the media, in pixels.
    pub const DEFAULT_CONTENT_CHROME_HEIGHT: f64 = 80.0;
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            gap: Self::DEFAULT_GAP,
            content_chrome_height: Self::DEFAULT_CONTENT_CHROME_HEIGHT,
        }
    }
}

/// Best-known height of `item` in a column `column_width` pixels wide,
/// including the trailing gap.
///
/// Measured height wins; otherwise the declared (or type-default) aspect
/// ratio is scaled to the column width and the chrome estimate added.
/// Pure: the same inputs always produce the same output.
pub fn estimate_height(item: &Item, column_width: f64, params: &HeightParams) -> f64 {
    if let Some(measured) = item.measured_height() {
        return measured + params.gap;
    }
    let column_width = column_width.max(0.0);
    column_width * item.aspect_ratio() + params.content_chrome_height + params.gap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, MediaKind};

    fn item(kind: MediaKind) -> Item {
        Item::new(ItemId::new("x").unwrap(), kind)
    }

    #[test]
    fn measured_height_supersedes_everything() {
        let item = item(MediaKind::Image)
            .with_declared_size(100.0, 400.0)
            .with_measured_height(123.0);
        let params = HeightParams::default();
        assert_eq!(estimate_height(&item, 300.0, &params), 139.0);
    }

    #[test]
    fn declared_size_scales_to_column() {
        let item = item(MediaKind::Other).with_declared_size(600.0, 900.0);
        let params = HeightParams {
            gap: 10.0,
            content_chrome_height: 50.0,
        };
        // 200 * 1.5 + 50 + 10
        assert_eq!(estimate_height(&item, 200.0, &params), 360.0);
    }

    #[test]
    fn type_defaults_when_nothing_known() {
        let params = HeightParams {
            gap: 0.0,
            content_chrome_height: 0.0,
        };
        assert_eq!(estimate_height(&item(MediaKind::Image), 320.0, &params), 320.0);
        assert_eq!(estimate_height(&item(MediaKind::Video), 320.0, &params), 180.0);
        assert_eq!(estimate_height(&item(MediaKind::Other), 320.0, &params), 240.0);
    }

    #[test]
    fn zero_width_column_still_counts_chrome() {
        let params = HeightParams::default();
        assert_eq!(estimate_height(&item(MediaKind::Image), 0.0, &params), 96.0);
    }

    #[test]
    fn estimation_is_stable() {
        let item = item(MediaKind::Video).with_declared_size(1920.0, 1080.0);
        let params = HeightParams::default();
        let first = estimate_height(&item, 287.5, &params);
        for _ in 0..10 {
            assert_eq!(estimate_height(&item, 287.5, &params), first);
        }
    }
}
