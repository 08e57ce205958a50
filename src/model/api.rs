//! Adapter from loosely typed API payloads to the canonical model.
//!
//! The feed API is inconsistent about field names (`id`/`postId`/`_id`,
//! `likes`/`likeCount`, ...). Everything is collapsed here so nothing past
//! this boundary sees the aliases.

use super::error::ParseError;
use super::identifiers::{Cursor, ItemId};
use super::item::{Item, ItemMeta, MediaKind};
use super::page::Page;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A post exactly as the API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    /// Post id, string or number.
    #[serde(default, alias = "postId", alias = "_id")]
    pub id: Option<Value>,

    /// Media type tag.
    #[serde(default, rename = "type", alias = "mediaType", alias = "postType")]
    pub kind: Option<String>,

    /// Declared media width.
    #[serde(default, alias = "imageWidth")]
    pub width: Option<f64>,

    /// Declared media height.
    #[serde(default, alias = "imageHeight")]
    pub height: Option<f64>,

    /// Video URL; its presence marks a video.
    #[serde(default)]
    pub video_url: Option<String>,

    /// Post title.
    #[serde(default)]
    pub title: Option<String>,

    /// Either a display name or an object with `nickname`/`username`/`name`.
    #[serde(default)]
    pub author: Option<Value>,

    /// Like count.
    #[serde(default, alias = "likeCount")]
    pub likes: Option<u64>,

    /// Creation timestamp as sent.
    #[serde(default, alias = "createTime", alias = "created_at")]
    pub created_at: Option<String>,
}

/// A page response exactly as the API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    /// Posts on this page.
    #[serde(default, alias = "list", alias = "records")]
    pub items: Vec<RawPost>,

    /// Explicit has-more flag, when sent.
    #[serde(default, alias = "has_more")]
    pub has_more: Option<bool>,

    /// Cursor for the following page.
    #[serde(default, alias = "cursor", alias = "next_cursor")]
    pub next_cursor: Option<Value>,
}

impl RawPost {
    /// Normalizes into an [`Item`].
    ///
    /// `index` is the post's position in its page and is only used for error
    /// reporting.
    pub fn into_item(self, index: usize) -> Result<Item, ParseError> {
        let raw_id = self
            .id
            .as_ref()
            .and_then(scalar_to_string)
            .ok_or(ParseError::MissingId { index })?;
        let id = ItemId::new(raw_id).map_err(|_| ParseError::MissingId { index })?;

        let kind = match (&self.kind, &self.video_url) {
            (Some(tag), _) if MediaKind::parse(tag) != MediaKind::Other => MediaKind::parse(tag),
            (_, Some(url)) if !url.is_empty() => MediaKind::Video,
            (Some(tag), _) => MediaKind::parse(tag),
            (None, _) => MediaKind::Other,
        };

        let meta = ItemMeta {
            title: self.title.filter(|t| !t.is_empty()),
            author: self.author.as_ref().and_then(author_name),
            like_count: self.likes.unwrap_or(0),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        };

        let mut item = Item::new(id, kind).with_meta(meta);
        if let (Some(width), Some(height)) = (self.width, self.height) {
            item = item.with_declared_size(width, height);
        }
        Ok(item)
    }
}

impl RawPage {
    /// Normalizes into a [`Page`].
    ///
    /// Posts that cannot be normalized are skipped and returned alongside the
    /// page; one bad post never sinks the whole page.
    pub fn into_page(self) -> (Page, Vec<ParseError>) {
        let mut items = Vec::with_capacity(self.items.len());
        let mut errors = Vec::new();

        for (index, post) in self.items.into_iter().enumerate() {
            match post.into_item(index) {
                Ok(item) => items.push(item),
                Err(err) => {
                    warn!(index, error = %err, "Skipping post that failed normalization");
                    errors.push(err);
                }
            }
        }

        let next_cursor = self
            .next_cursor
            .as_ref()
            .and_then(scalar_to_string)
            .and_then(Cursor::new);
        let has_more = self.has_more.unwrap_or(next_cursor.is_some());

        (Page::new(items, has_more, next_cursor), errors)
    }
}

/// Parses one JSON page response.
pub fn parse_page(json: &str) -> Result<(Page, Vec<ParseError>), ParseError> {
    let raw: RawPage = serde_json::from_str(json).map_err(|e| ParseError::InvalidJson {
        line: None,
        message: e.to_string(),
    })?;
    Ok(raw.into_page())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => ["nickname", "username", "name"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
