//! Timeline documents.
//!
//! A document is a JSON file holding an optional style section and the list
//! of events. Image paths are resolved relative to the document; decoding is
//! left to a caller-supplied loader so this crate stays free of codecs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::bullet::BulletKind;
use crate::color::Color;
use crate::event::{Image, TimeFrame};
use crate::style::{
    clamp_font_size, LabelStyle, LayoutDirection, LayoutMetrics, StyleConfig,
    DEFAULT_BULLET_SIZE, DEFAULT_TAIL_LENGTH,
};

/// Style section of a document. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleFile {
    #[serde(default = "default_line_color")]
    pub line_color: Color,

    #[serde(default = "default_date_color")]
    pub date_color: Color,

    #[serde(default = "default_date_font_size")]
    pub date_font_size: f64,

    #[serde(default = "default_text_color")]
    pub text_color: Color,

    #[serde(default = "default_text_font_size")]
    pub text_font_size: f64,

    #[serde(default)]
    pub bullet_kind: BulletKind,

    #[serde(default = "default_bullet_size")]
    pub bullet_size: f64,

    #[serde(default)]
    pub direction: LayoutDirection,

    #[serde(default = "default_tail_length")]
    pub tail_length: f64,

    #[serde(default)]
    pub metrics: LayoutMetrics,
}

fn default_line_color() -> Color {
    Color::LIGHT_GRAY
}

fn default_date_color() -> Color {
    LabelStyle::date().color
}

fn default_date_font_size() -> f64 {
    LabelStyle::date().font_size
}

fn default_text_color() -> Color {
    LabelStyle::detail().color
}

fn default_text_font_size() -> f64 {
    LabelStyle::detail().font_size
}

fn default_bullet_size() -> f64 {
    DEFAULT_BULLET_SIZE
}

fn default_tail_length() -> f64 {
    DEFAULT_TAIL_LENGTH
}

impl Default for StyleFile {
    fn default() -> Self {
        Self {
            line_color: default_line_color(),
            date_color: default_date_color(),
            date_font_size: default_date_font_size(),
            text_color: default_text_color(),
            text_font_size: default_text_font_size(),
            bullet_kind: BulletKind::default(),
            bullet_size: default_bullet_size(),
            direction: LayoutDirection::default(),
            tail_length: default_tail_length(),
            metrics: LayoutMetrics::default(),
        }
    }
}

impl StyleFile {
    /// Build the runtime style. Formatters are not part of documents.
    ///
    /// Out-of-range sizes and spacings are clamped so a bad document still
    /// lays out without overlapping labels.
    pub fn to_style(&self) -> StyleConfig {
        let date_size = clamp_font_size(self.date_font_size);
        let text_size = clamp_font_size(self.text_font_size);
        StyleConfig::default()
            .with_line_color(self.line_color)
            .with_date_label(LabelStyle::new(date_size, self.date_color))
            .with_text_label(LabelStyle::new(text_size, self.text_color))
            .with_bullet_kind(self.bullet_kind)
            .with_bullet_size(self.bullet_size)
            .with_direction(self.direction)
            .with_tail_length(self.tail_length)
            .with_metrics(self.metrics.clamped())
    }
}

/// One event as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Image path, relative to the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

/// A timeline document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineDocument {
    #[serde(default)]
    pub style: StyleFile,

    #[serde(default)]
    pub events: Vec<EventRecord>,

    /// Directory image paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl TimelineDocument {
    /// Load a document from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let mut document: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        document.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(
            path = %path.display(),
            events = document.events.len(),
            "Loaded timeline document"
        );
        Ok(document)
    }

    /// Save the document to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Pretty JSON for the document.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Resolve an image path from the document against its directory.
    pub fn resolve(&self, image: &Path) -> PathBuf {
        if image.is_absolute() {
            image.to_path_buf()
        } else {
            self.base_dir.join(image)
        }
    }

    /// Build frames, loading each referenced image with `load_image`.
    pub fn to_frames<F, E>(&self, mut load_image: F) -> Result<Vec<TimeFrame>, ConfigError>
    where
        F: FnMut(&Path) -> Result<Image, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.events
            .iter()
            .map(|record| {
                let mut frame = TimeFrame::new(record.date.clone());
                frame.text = record.text.clone();
                if let Some(relative) = &record.image {
                    let path = self.resolve(relative);
                    let image = load_image(&path).map_err(|e| ConfigError::Image {
                        path: path.clone(),
                        source: e.into(),
                    })?;
                    frame.image = Some(image);
                }
                Ok(frame)
            })
            .collect()
    }

    /// The demo document: a year of holidays with a few images.
    pub fn sample() -> Self {
        let event = |date: &str, text: &str, image: Option<&str>| EventRecord {
            date: date.into(),
            text: Some(text.into()),
            image: image.map(PathBuf::from),
        };
        Self {
            style: StyleFile {
                bullet_kind: BulletKind::Circle,
                ..StyleFile::default()
            },
            events: vec![
                event("January 1", "New Year's Day", Some("fireworks.jpeg")),
                event("February 14", "The month of love!", Some("heart.png")),
                event("March", "Comes like a lion, leaves like a lamb", None),
                event("April 1", "Dumb stupid pranks.", Some("april.jpeg")),
                event("No image?", "That's right. No image is necessary!", None),
                event(
                    "Long text",
                    "This control can stretch. It doesn't matter how long or short the text is. \
                     The control always fits the content, and even extends a while at the end so \
                     the scroll view it is put into, even when pulled pretty far down, does not \
                     show the end of the line.",
                    None,
                ),
                event("That's it!", "Hope this helps someone!", None),
            ],
            base_dir: PathBuf::new(),
        }
    }
}

/// Errors that can occur when working with timeline documents.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing document JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing a document to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The image loader failed.
    #[error("Failed to load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
