//! Style configuration for a timeline.
//!
//! [`StyleConfig`] is an immutable value: the `with_*` methods return a new
//! config, and the [`Timeline`](crate::Timeline) relays out whenever it
//! receives one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::bullet::BulletKind;
use crate::color::Color;

/// Smallest bullet size accepted; smaller or non-finite sizes clamp to this.
pub const MIN_BULLET_SIZE: f64 = 1.0;

/// Smallest label font size accepted from documents.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Default bullet diameter in layout units.
pub const DEFAULT_BULLET_SIZE: f64 = 18.0;

/// Default length of the line drawn past the last event.
pub const DEFAULT_TAIL_LENGTH: f64 = 2000.0;

/// Writing direction. `Rtl` pins bullets to the right edge and mirrors
/// everything else to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        matches!(self, LayoutDirection::Rtl)
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            LayoutDirection::Ltr => LayoutDirection::Rtl,
            LayoutDirection::Rtl => LayoutDirection::Ltr,
        }
    }

    /// Physical alignment of "natural" (leading-aligned) text.
    pub fn natural_alignment(self) -> TextAlign {
        match self {
            LayoutDirection::Ltr => TextAlign::Left,
            LayoutDirection::Rtl => TextAlign::Right,
        }
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutDirection::Ltr => f.write_str("ltr"),
            LayoutDirection::Rtl => f.write_str("rtl"),
        }
    }
}

impl FromStr for LayoutDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(LayoutDirection::Ltr),
            "rtl" => Ok(LayoutDirection::Rtl),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Unknown layout direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout direction {0:?} (expected ltr or rtl)")]
pub struct ParseDirectionError(pub String);

/// Horizontal alignment of label lines within their box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
}

/// Appearance of one label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub font_size: f64,
    pub color: Color,
}

impl LabelStyle {
    pub const fn new(font_size: f64, color: Color) -> Self {
        Self { font_size, color }
    }

    /// Style of the larger date title.
    pub const fn date() -> Self {
        Self::new(20.0, Color::TEAL)
    }

    /// Style of the smaller body text.
    pub const fn detail() -> Self {
        Self::new(16.0, Color::DETAIL_GRAY)
    }
}

/// Callback that adjusts a label's style given its text, run before the
/// label is measured.
pub type LabelFormatter = Arc<dyn Fn(&str, &mut LabelStyle) + Send + Sync>;

/// Spacing constants used by the block layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Offset of the zero-height guide the first block hangs from.
    pub top_margin: f64,
    /// Distance of the bullet from the block's leading edge and top.
    pub bullet_inset: f64,
    /// Gap between the bullet's trailing edge and the labels.
    pub label_gap: f64,
    /// Gap between the date label and the body text.
    pub text_gap: f64,
    /// Gap between the last label and the image box.
    pub image_gap: f64,
    pub image_height: f64,
    pub image_corner_radius: f64,
    /// Space kept free between the image box and the trailing edge.
    pub image_trailing_margin: f64,
    /// Space kept free between labels and the trailing edge.
    pub trailing_margin: f64,
    /// Space below the last element of a block.
    pub bottom_margin: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            top_margin: 0.0,
            bullet_inset: 8.0,
            label_gap: 8.0,
            text_gap: 6.0,
            image_gap: 10.0,
            image_height: 130.0,
            image_corner_radius: 10.0,
            image_trailing_margin: 20.0,
            trailing_margin: 8.0,
            bottom_margin: 10.0,
        }
    }
}

impl LayoutMetrics {
    /// Replace negative or non-finite spacings with zero.
    #[must_use]
    pub fn clamped(self) -> Self {
        let clamp = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                tracing::warn!(metric = name, requested = value, "Clamping layout metric to 0");
                0.0
            }
        };
        Self {
            top_margin: clamp("top_margin", self.top_margin),
            bullet_inset: clamp("bullet_inset", self.bullet_inset),
            label_gap: clamp("label_gap", self.label_gap),
            text_gap: clamp("text_gap", self.text_gap),
            image_gap: clamp("image_gap", self.image_gap),
            image_height: clamp("image_height", self.image_height),
            image_corner_radius: clamp("image_corner_radius", self.image_corner_radius),
            image_trailing_margin: clamp("image_trailing_margin", self.image_trailing_margin),
            trailing_margin: clamp("trailing_margin", self.trailing_margin),
            bottom_margin: clamp("bottom_margin", self.bottom_margin),
        }
    }
}

/// Complete style of a timeline.
#[derive(Clone)]
pub struct StyleConfig {
    pub line_color: Color,
    pub date_label: LabelStyle,
    pub text_label: LabelStyle,
    pub date_label_formatter: Option<LabelFormatter>,
    pub text_label_formatter: Option<LabelFormatter>,
    pub bullet_kind: BulletKind,
    bullet_size: f64,
    pub direction: LayoutDirection,
    pub tail_length: f64,
    pub metrics: LayoutMetrics,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_color: Color::LIGHT_GRAY,
            date_label: LabelStyle::date(),
            text_label: LabelStyle::detail(),
            date_label_formatter: None,
            text_label_formatter: None,
            bullet_kind: BulletKind::default(),
            bullet_size: DEFAULT_BULLET_SIZE,
            direction: LayoutDirection::default(),
            tail_length: DEFAULT_TAIL_LENGTH,
            metrics: LayoutMetrics::default(),
        }
    }
}

impl fmt::Debug for StyleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleConfig")
            .field("line_color", &self.line_color)
            .field("date_label", &self.date_label)
            .field("text_label", &self.text_label)
            .field("date_label_formatter", &self.date_label_formatter.is_some())
            .field("text_label_formatter", &self.text_label_formatter.is_some())
            .field("bullet_kind", &self.bullet_kind)
            .field("bullet_size", &self.bullet_size)
            .field("direction", &self.direction)
            .field("tail_length", &self.tail_length)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl StyleConfig {
    /// Bullet diameter, always at least [`MIN_BULLET_SIZE`].
    pub fn bullet_size(&self) -> f64 {
        self.bullet_size
    }

    #[must_use]
    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    #[must_use]
    pub fn with_date_label(mut self, style: LabelStyle) -> Self {
        self.date_label = style;
        self
    }

    #[must_use]
    pub fn with_text_label(mut self, style: LabelStyle) -> Self {
        self.text_label = style;
        self
    }

    #[must_use]
    pub fn with_date_label_formatter(mut self, formatter: Option<LabelFormatter>) -> Self {
        self.date_label_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_text_label_formatter(mut self, formatter: Option<LabelFormatter>) -> Self {
        self.text_label_formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_bullet_kind(mut self, kind: BulletKind) -> Self {
        self.bullet_kind = kind;
        self
    }

    /// Set the bullet diameter, clamping non-positive or non-finite values.
    #[must_use]
    pub fn with_bullet_size(mut self, size: f64) -> Self {
        self.bullet_size = clamp_bullet_size(size);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the tail length; negative or non-finite values become zero.
    #[must_use]
    pub fn with_tail_length(mut self, length: f64) -> Self {
        self.tail_length = if length.is_finite() { length.max(0.0) } else { 0.0 };
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: LayoutMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Effective date label style for `text`, after the formatter ran.
    pub fn date_style_for(&self, text: &str) -> LabelStyle {
        apply_formatter(self.date_label, self.date_label_formatter.as_ref(), text)
    }

    /// Effective body label style for `text`, after the formatter ran.
    pub fn text_style_for(&self, text: &str) -> LabelStyle {
        apply_formatter(self.text_label, self.text_label_formatter.as_ref(), text)
    }
}

fn apply_formatter(base: LabelStyle, formatter: Option<&LabelFormatter>, text: &str) -> LabelStyle {
    let mut style = base;
    if let Some(formatter) = formatter {
        formatter(text, &mut style);
    }
    style
}

fn clamp_bullet_size(size: f64) -> f64 {
    if size.is_finite() && size >= MIN_BULLET_SIZE {
        size
    } else {
        tracing::warn!(requested = size, clamped = MIN_BULLET_SIZE, "Clamping bullet size");
        MIN_BULLET_SIZE
    }
}

/// Font sizes below [`MIN_FONT_SIZE`] or non-finite clamp to it.
pub(crate) fn clamp_font_size(size: f64) -> f64 {
    if size.is_finite() && size >= MIN_FONT_SIZE {
        size
    } else {
        tracing::warn!(requested = size, clamped = MIN_FONT_SIZE, "Clamping font size");
        MIN_FONT_SIZE
    }
}
