//! The timeline component.
//!
//! [`Timeline`] owns the event list, the style, and the text measurer, and
//! keeps a [`LayoutTree`] that is rebuilt wholesale after every mutation.

use std::fmt;
use std::sync::Arc;

use crate::bullet::BulletKind;
use crate::color::Color;
use crate::event::TimeFrame;
use crate::geometry::{Point, Size};
use crate::layout::{layout_timeline, LayoutTree};
use crate::style::{LabelFormatter, LabelStyle, LayoutDirection, StyleConfig};
use crate::text::{MonospaceMetrics, TextMeasure};

/// Container width used until the host reports one.
pub const DEFAULT_WIDTH: f64 = 320.0;

/// A vertically stacked timeline of dated events.
pub struct Timeline {
    events: Vec<TimeFrame>,
    style: StyleConfig,
    width: f64,
    measure: Box<dyn TextMeasure>,
    layout: LayoutTree,
}

impl Timeline {
    /// Create a timeline with the given bullet kind and events.
    pub fn new(bullet_kind: BulletKind, events: Vec<TimeFrame>) -> Self {
        let style = StyleConfig::default().with_bullet_kind(bullet_kind);
        Self::with_style(style, events)
    }

    /// Create a timeline with a complete style.
    pub fn with_style(style: StyleConfig, events: Vec<TimeFrame>) -> Self {
        let measure: Box<dyn TextMeasure> = Box::new(MonospaceMetrics::default());
        let layout = layout_timeline(&events, &style, DEFAULT_WIDTH, measure.as_ref());
        Self {
            events,
            style,
            width: DEFAULT_WIDTH,
            measure,
            layout,
        }
    }

    /// Use `width` as the available container width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.set_width(width);
        self
    }

    /// Use a different text measurer.
    #[must_use]
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self.relayout();
        self
    }

    pub fn events(&self) -> &[TimeFrame] {
        &self.events
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// The current layout.
    pub fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    /// Height of the laid-out content, including the tail. Scroll containers
    /// hosting the timeline size their content to this.
    pub fn content_height(&self) -> f64 {
        self.layout.height
    }

    pub fn content_size(&self) -> Size {
        self.layout.content_size()
    }

    /// Replace the event list.
    pub fn set_events(&mut self, events: Vec<TimeFrame>) {
        self.events = events;
        self.relayout();
    }

    /// Replace the whole style.
    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
        self.relayout();
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.update_style(|s| s.with_line_color(color));
    }

    pub fn set_bullet_kind(&mut self, kind: BulletKind) {
        self.update_style(|s| s.with_bullet_kind(kind));
    }

    /// Set the bullet diameter. Non-positive sizes are clamped.
    pub fn set_bullet_size(&mut self, size: f64) {
        self.update_style(|s| s.with_bullet_size(size));
    }

    pub fn set_date_label_style(&mut self, style: LabelStyle) {
        self.update_style(|s| s.with_date_label(style));
    }

    pub fn set_text_label_style(&mut self, style: LabelStyle) {
        self.update_style(|s| s.with_text_label(style));
    }

    pub fn set_date_label_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(&str, &mut LabelStyle) + Send + Sync + 'static,
    {
        let formatter: LabelFormatter = Arc::new(formatter);
        self.update_style(|s| s.with_date_label_formatter(Some(formatter)));
    }

    pub fn set_text_label_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(&str, &mut LabelStyle) + Send + Sync + 'static,
    {
        let formatter: LabelFormatter = Arc::new(formatter);
        self.update_style(|s| s.with_text_label_formatter(Some(formatter)));
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.update_style(|s| s.with_direction(direction));
    }

    pub fn set_tail_length(&mut self, length: f64) {
        self.update_style(|s| s.with_tail_length(length));
    }

    /// Set the available container width.
    pub fn set_width(&mut self, width: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.relayout();
    }

    /// Dispatch a tap at `point` to the image region under it.
    pub fn tap(&self, point: Point) -> bool {
        self.layout.tap(point)
    }

    /// Throw away the current layout and build a new one.
    pub fn relayout(&mut self) {
        self.layout = layout_timeline(&self.events, &self.style, self.width, self.measure.as_ref());
        tracing::debug!(
            events = self.events.len(),
            width = self.width,
            height = self.layout.height,
            bullet = %self.style.bullet_kind,
            direction = %self.style.direction,
            "Timeline relaid out"
        );
    }

    fn update_style(&mut self, update: impl FnOnce(StyleConfig) -> StyleConfig) {
        let style = update(self.style.clone());
        self.set_style(style);
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("events", &self.events)
            .field("style", &self.style)
            .field("width", &self.width)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}
