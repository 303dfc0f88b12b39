//! Timeline widget for rendering a layout tree.
//!
//! Lines and bullets are drawn on a braille canvas; labels and image names
//! are written straight into cells so they land on exact rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line},
        Widget,
    },
};
use timeline_engine::layout::LabelBox;
use timeline_engine::Rect as LayoutRect;
use timeline_engine::{LayoutTree, PathSpec, Point, Segment, TextAlign};
use unicode_width::UnicodeWidthStr;

use crate::metrics::CellMetrics;
use crate::theme::{to_terminal, Theme};

/// Timeline pane widget.
pub struct TimelineWidget<'a> {
    layout: &'a LayoutTree,
    theme: &'a Theme,
    metrics: CellMetrics,
    /// First visible content row.
    offset: usize,
}

impl<'a> TimelineWidget<'a> {
    /// Create a new timeline widget.
    pub fn new(layout: &'a LayoutTree, theme: &'a Theme) -> Self {
        Self {
            layout,
            theme,
            metrics: CellMetrics::default(),
            offset: 0,
        }
    }

    /// Set the cell geometry the layout was computed with.
    #[must_use]
    pub fn metrics(mut self, metrics: CellMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Set the first visible content row.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Draw the connecting line, bullets and image outlines. Everything is
    /// clipped to `visible`, since the canvas drops lines that leave it.
    fn paint(&self, ctx: &mut Context<'_>, visible: &LayoutRect) {
        let line_color = to_terminal(self.layout.line_color);
        for segment in &self.layout.line_segments() {
            draw_segment(ctx, segment, visible, line_color);
        }

        for block in &self.layout.blocks {
            match &block.bullet.path {
                PathSpec::Oval { bounds } => {
                    let center = bounds.center();
                    ctx.draw(&Circle {
                        x: center.x,
                        y: -center.y,
                        radius: bounds.width.min(bounds.height) / 2.0,
                        color: line_color,
                    });
                }
                path @ PathSpec::Polyline { .. } => {
                    for segment in &path.segments() {
                        draw_segment(ctx, segment, visible, line_color);
                    }
                }
            }

            if let Some(image) = &block.image {
                for edge in &outline(&image.frame) {
                    draw_segment(ctx, edge, visible, self.theme.image);
                }
            }
        }
    }

    /// Write one label's lines into the cells it covers.
    fn render_label(&self, label: &LabelBox, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(to_terminal(label.style.color));
        for (i, text) in label.lines.iter().enumerate() {
            let y = label.frame.y + i as f64 * label.line_height;
            let x = match label.align {
                TextAlign::Left => label.frame.x,
                TextAlign::Right => {
                    label.frame.right() - text.width() as f64 * self.metrics.cell_width
                }
            };
            self.put_text(x, y, text, style, area, buf);
        }
    }

    /// Write `text` at layout point (`x`, `y`) if that row is visible.
    fn put_text(&self, x: f64, y: f64, text: &str, style: Style, area: Rect, buf: &mut Buffer) {
        let row = (y / self.metrics.cell_height).round();
        let column = (x / self.metrics.cell_width).round().max(0.0);
        if row < self.offset as f64 {
            return;
        }
        let row = row as usize - self.offset;
        if row >= usize::from(area.height) || column >= f64::from(area.width) {
            return;
        }
        let column = column as u16;
        buf.set_stringn(
            area.x + column,
            area.y + row as u16,
            text,
            usize::from(area.width - column),
            style,
        );
    }
}

/// The four edges of `frame`.
fn outline(frame: &LayoutRect) -> [Segment; 4] {
    let top_left = frame.origin();
    let top_right = Point::new(frame.right(), frame.top());
    let bottom_right = Point::new(frame.right(), frame.bottom());
    let bottom_left = Point::new(frame.left(), frame.bottom());
    [
        Segment::new(top_left, top_right),
        Segment::new(top_right, bottom_right),
        Segment::new(bottom_right, bottom_left),
        Segment::new(bottom_left, top_left),
    ]
}

/// Canvas y grows upwards, layout y grows downwards.
fn draw_segment(ctx: &mut Context<'_>, segment: &Segment, visible: &LayoutRect, color: Color) {
    let Some(segment) = segment.clipped(visible) else {
        return;
    };
    ctx.draw(&Line {
        x1: segment.start.x,
        y1: -segment.start.y,
        x2: segment.end.x,
        y2: -segment.end.y,
        color,
    });
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let top = self.offset as f64 * self.metrics.cell_height;
        let bottom = top + f64::from(area.height) * self.metrics.cell_height;
        let right = self.metrics.width_of(area.width);
        let visible = LayoutRect::new(0.0, top, right, bottom - top);

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.theme.base)
            .x_bounds([0.0, right])
            .y_bounds([-bottom, -top])
            .paint(|ctx| self.paint(ctx, &visible))
            .render(area, buf);

        let name_style = Style::default().fg(self.theme.subtext);
        for block in &self.layout.blocks {
            if block.frame.top() >= bottom || block.frame.bottom() < top {
                continue;
            }
            self.render_label(&block.date_label, area, buf);
            if let Some(label) = &block.text_label {
                self.render_label(label, area, buf);
            }
            if let Some(image) = &block.image {
                let name = format!("[{}]", image.image.name());
                let center = image.frame.center();
                let x = center.x - name.width() as f64 * self.metrics.cell_width / 2.0;
                self.put_text(x, center.y, &name, name_style, area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use timeline_engine::{BulletKind, Image, LayoutDirection, TimeFrame, Timeline};

    fn render(timeline: &Timeline, width: u16, height: u16, offset: usize) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        TimelineWidget::new(timeline.layout(), &theme)
            .offset(offset)
            .render(area, &mut buffer);
        buffer_to_string(&buffer)
    }

    fn sample_timeline(width: u16) -> Timeline {
        let metrics = CellMetrics::default();
        Timeline::new(
            BulletKind::Diamond,
            vec![
                TimeFrame::new("January 1")
                    .text("New Year's Day")
                    .image(Image::new("fireworks.jpeg", 640, 480, Vec::new())),
                TimeFrame::new("March").text("Comes like a lion"),
            ],
        )
        .with_measure(metrics)
        .with_width(metrics.width_of(width))
    }

    fn column_of(s: &str, needle: &str) -> usize {
        let line = s.lines().find(|l| l.contains(needle)).unwrap();
        line[..line.find(needle).unwrap()].chars().count()
    }

    fn has_braille(s: &str) -> bool {
        s.chars().any(|c| ('\u{2801}'..='\u{28ff}').contains(&c))
    }

    #[test]
    fn test_renders_labels_and_bullets() {
        let result = render(&sample_timeline(40), 40, 20, 0);
        assert!(result.contains("January 1"));
        assert!(result.contains("New Year's Day"));
        assert!(result.contains("[fireworks.jpeg]"));
        assert!(result.contains("March"));
        assert!(has_braille(&result));
    }

    #[test]
    fn test_scrolled_past_labels() {
        let timeline = sample_timeline(40);
        let rows = CellMetrics::default().rows_for(timeline.layout().blocks[1].frame.bottom());
        let result = render(&timeline, 40, 10, rows);
        assert!(!result.contains("January"));
        assert!(!result.contains("March"));
        // The tail is still drawn.
        assert!(has_braille(&result));
    }

    #[test]
    fn test_tail_reaches_viewport_bottom() {
        let metrics = CellMetrics::default();
        let timeline = Timeline::new(BulletKind::Diamond, vec![TimeFrame::new("January 1")])
            .with_measure(metrics)
            .with_width(metrics.width_of(40));
        assert_eq!(timeline.style().tail_length, 2000.0);

        let result = render(&timeline, 40, 10, 0);
        let last = result.lines().last().unwrap();
        assert!(has_braille(last), "tail missing from last row:\n{result}");

        let scrolled = render(&timeline, 40, 10, 10);
        assert!(has_braille(&scrolled));
    }

    #[test]
    fn test_connector_crossing_viewport_top_is_drawn() {
        // Block 0 runs from row 0 past row 12; its bottom connector sits in
        // column 2 and crosses the top of a viewport scrolled to row 3.
        let timeline = sample_timeline(40);
        let result = render(&timeline, 40, 5, 3);
        for line in result.lines() {
            let cell = line.chars().nth(2).unwrap();
            assert!(has_braille(&cell.to_string()), "no connector in:\n{result}");
        }
    }

    #[test]
    fn test_rtl_right_aligns_labels() {
        let mut timeline = sample_timeline(40);
        timeline.set_direction(LayoutDirection::Rtl);
        let rtl = render(&timeline, 40, 20, 0);
        let ltr = render(&sample_timeline(40), 40, 20, 0);
        assert_eq!(column_of(&ltr, "March"), 4);
        // Right edge of the mirrored label column is 286 units, cell 35.75.
        assert_eq!(column_of(&rtl, "March"), 31);
    }

    #[test]
    fn test_empty_area_is_noop() {
        let timeline = sample_timeline(40);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 0, 0);
        let mut buffer = Buffer::empty(area);
        TimelineWidget::new(timeline.layout(), &theme).render(area, &mut buffer);
    }
}
