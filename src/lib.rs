//! Waterfall
//!
//! Masonry (waterfall) feed layout engine with cursor-based infinite scroll.
//!
//! The core is [`layout::MasonryLayout`]: greedy shortest-column placement,
//! incremental on append, recomputed on column changes and on measurements
//! outside a dead band. [`feed::FeedSession`] owns one engine together with
//! its pagination state and discards stale pages after context switches.

pub mod config;
pub mod feed;
pub mod layout;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;

// Re-export main loop integration
pub mod integration;
