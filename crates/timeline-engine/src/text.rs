//! Text measurement.
//!
//! The layout engine never draws glyphs; it only needs to know how a label
//! wraps inside a width and how tall the result is. [`TextMeasure`] is that
//! seam. [`MonospaceMetrics`] is the default measurer: every column is a
//! fixed fraction of the font size wide, and wrapping is done by `textwrap`.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::geometry::Size;
use crate::style::LabelStyle;

/// A label broken into lines, with the size it occupies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub size: Size,
    /// Height of one line.
    pub line_height: f64,
}

/// Measures how text wraps inside a maximum width.
pub trait TextMeasure {
    /// Break `text` into lines no wider than `max_width` and report the size
    /// of the result. Height is unbounded.
    fn measure(&self, text: &str, max_width: f64, style: &LabelStyle) -> TextBlock;
}

/// Fixed-advance measurer driven by the label's font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Column advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str, max_width: f64, style: &LabelStyle) -> TextBlock {
        let advance = (style.font_size * self.advance_ratio).max(f64::EPSILON);
        let line_height = style.font_size * self.line_height_ratio;
        wrap_to_columns(text, max_width, advance, line_height)
    }
}

/// Wrap `text` into as many columns of width `advance` as fit in
/// `max_width` (at least one), then size the result.
pub fn wrap_to_columns(text: &str, max_width: f64, advance: f64, line_height: f64) -> TextBlock {
    let columns = if max_width.is_finite() && max_width > 0.0 {
        ((max_width / advance).floor() as usize).max(1)
    } else {
        1
    };
    let lines = wrap_text(text, columns);
    let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    TextBlock {
        size: Size::new(widest as f64 * advance, lines.len() as f64 * line_height),
        lines,
        line_height,
    }
}

/// Wrap a plain text string to the specified column width, keeping explicit
/// line breaks. Empty text still occupies one (empty) line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(paragraph, width.max(1))
                .into_iter()
                .map(std::borrow::Cow::into_owned),
        );
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
