//! timeline-engine: Headless layout engine for vertical event timelines
//!
//! This crate turns a list of dated events into a resolved geometry tree:
//! - Bullet glyph paths for every marker shape
//! - Label wrapping and block stacking
//! - Connector segments and the trailing tail
//! - Right-to-left mirroring and image tap targets
//! - JSON timeline documents

pub mod bullet;
pub mod color;
pub mod config;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod text;
pub mod timeline;

// Re-export commonly used types
pub use bullet::{generate_bullet_path, regular_polygon, BulletKind, ParseBulletKindError, PathSpec};
pub use color::{Color, ColorParseError};
pub use config::{ConfigError, EventRecord, StyleFile, TimelineDocument};
pub use event::{Image, TapHandler, TimeFrame};
pub use geometry::{Point, Rect, Segment, Size};
pub use layout::{
    layout_timeline, BulletGlyph, Connectors, ImageBox, LabelBox, LayoutBlock, LayoutTree, TapTarget,
};
pub use style::{
    LabelFormatter, LabelStyle, LayoutDirection, LayoutMetrics, ParseDirectionError, StyleConfig,
    TextAlign,
};
pub use text::{MonospaceMetrics, TextBlock, TextMeasure};
pub use timeline::Timeline;
