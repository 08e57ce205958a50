//! Feed item: the unit the masonry engine lays out.

use super::identifiers::ItemId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Media type of an item. Decides the fallback aspect ratio when nothing
/// better is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video; laid out at its poster aspect.
    Video,
    /// Text or unrecognized post type.
    #[default]
    Other,
}

impl MediaKind {
    /// Default aspect ratio as height / width.
    ///
    /// Images are assumed square, videos 16:9, anything else 4:3.
    pub fn default_aspect_ratio(self) -> f64 {
        match self {
            MediaKind::Image => 1.0,
            MediaKind::Video => 9.0 / 16.0,
            MediaKind::Other => 3.0 / 4.0,
        }
    }

    /// Lenient parse of the type tags the API uses.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "image" | "images" | "photo" | "picture" | "img" => MediaKind::Image,
            "video" | "videos" | "clip" | "movie" => MediaKind::Video,
            _ => MediaKind::Other,
        }
    }
}

/// Server-declared media dimensions. Only meaningful when both sides are
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeclaredSize {
    /// Width in the server's units.
    pub width: f64,
    /// Height in the server's units.
    pub height: f64,
}

impl DeclaredSize {
    /// Returns `None` unless both dimensions are finite and positive.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Height / width.
    pub fn aspect_ratio(&self) -> f64 {
        self.height / self.width
    }
}

/// Display metadata carried along for the render surface. The layout engine
/// never reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ItemMeta {
    /// Post title.
    pub title: Option<String>,
    /// Author display name.
    pub author: Option<String>,
    /// Like count; zero when absent.
    pub like_count: u64,
    /// Publication time.
    pub created_at: Option<DateTime<Utc>>,
}

/// One feed entry to be laid out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: ItemId,
    kind: MediaKind,
    declared_size: Option<DeclaredSize>,
    measured_height: Option<f64>,
    meta: ItemMeta,
}

impl Item {
    /// Item with nothing known beyond its type.
    pub fn new(id: ItemId, kind: MediaKind) -> Self {
        Self {
            id,
            kind,
            declared_size: None,
            measured_height: None,
            meta: ItemMeta::default(),
        }
    }

    /// Attach declared dimensions. Invalid pairs are dropped silently so the
    /// item falls back to its type default.
    pub fn with_declared_size(mut self, width: f64, height: f64) -> Self {
        self.declared_size = DeclaredSize::new(width, height);
        self
    }

    /// Sets the rendered height. Negative values are clamped to zero.
    pub fn with_measured_height(mut self, height: f64) -> Self {
        self.measured_height = Some(height.max(0.0));
        self
    }

    /// Attaches display metadata.
    pub fn with_meta(mut self, meta: ItemMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Stable reconciliation key.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Media type.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Server-declared dimensions, when both sides were valid.
    pub fn declared_size(&self) -> Option<DeclaredSize> {
        self.declared_size
    }

    /// Rendered height, once measured.
    pub fn measured_height(&self) -> Option<f64> {
        self.measured_height
    }

    /// Display metadata.
    pub fn meta(&self) -> &ItemMeta {
        &self.meta
    }

    /// Best-known aspect ratio (height / width) before measurement.
    pub fn aspect_ratio(&self) -> f64 {
        self.declared_size
            .map(|size| size.aspect_ratio())
            .unwrap_or_else(|| self.kind.default_aspect_ratio())
    }

    /// Records a rendered height. Negative values are clamped to zero.
    pub(crate) fn set_measured_height(&mut self, height: f64) {
        self.measured_height = Some(height.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[test]
    fn default_ratios_per_kind() {
        assert_eq!(MediaKind::Image.default_aspect_ratio(), 1.0);
        assert_eq!(MediaKind::Video.default_aspect_ratio(), 0.5625);
        assert_eq!(MediaKind::Other.default_aspect_ratio(), 0.75);
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(MediaKind::parse("IMAGE"), MediaKind::Image);
        assert_eq!(MediaKind::parse(" video "), MediaKind::Video);
        assert_eq!(MediaKind::parse("article"), MediaKind::Other);
        assert_eq!(MediaKind::parse(""), MediaKind::Other);
    }

    #[test]
    fn declared_size_rejects_non_positive() {
        assert!(DeclaredSize::new(0.0, 100.0).is_none());
        assert!(DeclaredSize::new(100.0, -1.0).is_none());
        assert!(DeclaredSize::new(f64::NAN, 100.0).is_none());
        assert!(DeclaredSize::new(200.0, 100.0).is_some());
    }

    #[test]
    fn aspect_ratio_prefers_declared_size() {
        let item = Item::new(id("a"), MediaKind::Image).with_declared_size(400.0, 600.0);
        assert_eq!(item.aspect_ratio(), 1.5);
    }

    #[test]
    fn invalid_declared_size_falls_back_to_kind() {
        let item = Item::new(id("a"), MediaKind::Video).with_declared_size(0.0, 600.0);
        assert!(item.declared_size().is_none());
        assert_eq!(item.aspect_ratio(), 0.5625);
    }

    #[test]
    fn measured_height_is_clamped() {
        let item = Item::new(id("a"), MediaKind::Other).with_measured_height(-5.0);
        assert_eq!(item.measured_height(), Some(0.0));
    }
}
