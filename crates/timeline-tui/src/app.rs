//! Application state and update logic for the timeline viewer.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use timeline_engine::{Image, StyleConfig, TimeFrame, Timeline};

use crate::event::Action;
use crate::metrics::CellMetrics;
use crate::status_bar::{StatusBar, StatusBarContent};
use crate::theme::Theme;
use crate::viewer::{ScrollState, TimelineWidget, SCROLL_SPEED};

/// Smallest terminal the viewer draws into.
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 5;

/// Key hint shown in the status bar.
const HINT: &str = "j/k scroll · b bullet · r direction · q quit";

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Shown in the status bar.
    pub title: String,

    pub theme: Theme,

    timeline: Timeline,
    metrics: CellMetrics,
    scroll: ScrollState,

    /// Terminal area from the last resize.
    area: Rect,
    /// Where the timeline was placed by the last resize.
    viewport: Rect,

    /// Image names reported by tap callbacks.
    taps: Receiver<String>,
    notice: Option<String>,
}

impl App {
    /// Create the viewer for `events`. Every event with an image also reports
    /// taps to the status bar, after running its own callback.
    pub fn new(title: impl Into<String>, style: StyleConfig, events: Vec<TimeFrame>) -> Self {
        let (tx, taps) = mpsc::channel();
        let events = events
            .into_iter()
            .map(|frame| report_taps(frame, &tx))
            .collect();
        let metrics = CellMetrics::default();
        Self {
            should_quit: false,
            title: title.into(),
            theme: Theme::default(),
            timeline: Timeline::with_style(style, events).with_measure(metrics),
            metrics,
            scroll: ScrollState::new(),
            area: Rect::default(),
            viewport: Rect::default(),
            taps,
            notice: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// The last tap message, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Fit the timeline to a terminal of size `area`. The bottom row is kept
    /// for the status bar.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.viewport = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
        let width = self.metrics.width_of(self.viewport.width);
        if (width - self.timeline.width()).abs() > f64::EPSILON {
            self.timeline.set_width(width);
        }
        self.sync_scroll();
    }

    /// Apply an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Up => self.scroll.scroll_up(1),
            Action::Down => self.scroll.scroll_down(1),
            Action::WheelUp => self.scroll.scroll_up(SCROLL_SPEED),
            Action::WheelDown => self.scroll.scroll_down(SCROLL_SPEED),
            Action::PageUp => self.scroll.page_up(),
            Action::PageDown => self.scroll.page_down(),
            Action::Top => self.scroll.jump_to_start(),
            Action::Bottom => self.scroll.jump_to_end(),
            Action::CycleBullet => {
                let next = self.timeline.style().bullet_kind.next();
                self.timeline.set_bullet_kind(next);
                self.sync_scroll();
            }
            Action::ToggleDirection => {
                let next = self.timeline.style().direction.toggled();
                self.timeline.set_direction(next);
                self.sync_scroll();
            }
            Action::Tap(column, row) => {
                self.tap_cell(column, row);
            }
            Action::None => {}
        }
    }

    /// Tap the terminal cell at (`column`, `row`). Returns whether an image
    /// callback fired.
    pub fn tap_cell(&mut self, column: u16, row: u16) -> bool {
        // Only the too-small warning is on screen.
        if is_too_small(self.area) {
            return false;
        }
        let v = self.viewport;
        if column < v.x || row < v.y || column >= v.x + v.width || row >= v.y + v.height {
            return false;
        }
        let Some(content_row) = self.scroll.row_to_content(usize::from(row - v.y)) else {
            return false;
        };
        let point = self.metrics.cell_center(column - v.x, content_row);
        let fired = self.timeline.tap(point);
        while let Ok(message) = self.taps.try_recv() {
            self.notice = Some(message);
        }
        fired
    }

    /// Status bar content for the current state.
    pub fn status(&self) -> StatusBarContent {
        let max = self.scroll.max_offset();
        let position = if max == 0 {
            "all".to_string()
        } else {
            format!("{}%", self.scroll.offset() * 100 / max)
        };
        StatusBarContent {
            title: self.title.clone(),
            bullet: self.timeline.style().bullet_kind.to_string(),
            direction: self.timeline.style().direction.to_string(),
            position: Some(position),
            notice: self.notice.clone(),
            hint: Some(HINT.into()),
        }
    }

    /// Draw the viewer into `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if is_too_small(area) {
            StatusBar::new(&StatusBarContent::too_small(), &self.theme).render(area, buf);
            return;
        }

        let viewport = Rect::new(area.x, area.y, area.width, area.height - 1);
        TimelineWidget::new(self.timeline.layout(), &self.theme)
            .metrics(self.metrics)
            .offset(self.scroll.offset())
            .render(viewport, buf);

        let status_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
        StatusBar::new(&self.status(), &self.theme).render(status_area, buf);
    }

    fn sync_scroll(&mut self) {
        let content_rows = self.metrics.rows_for(self.timeline.content_height());
        self.scroll
            .resize(content_rows, usize::from(self.viewport.height));
    }
}

fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

/// Wrap the frame's tap callback so the viewer hears about taps too.
fn report_taps(mut frame: TimeFrame, tx: &Sender<String>) -> TimeFrame {
    if frame.image.is_none() {
        return frame;
    }
    let previous = frame.on_image_tapped.take();
    let tx = tx.clone();
    frame.on_image_tapped = Some(Arc::new(move |image: &Image| {
        if let Some(handler) = &previous {
            handler(image);
        }
        let _ = tx.send(format!(
            "Tapped {} ({}x{})",
            image.name(),
            image.width(),
            image.height()
        ));
    }));
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_app_to_string, TEST_HEIGHT, TEST_WIDTH};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use timeline_engine::{BulletKind, LayoutDirection};

    #[test]
    fn test_resize_sets_width_and_viewport() {
        let app = create_test_app();
        assert_eq!(app.timeline().width(), f64::from(TEST_WIDTH) * 8.0);
        assert_eq!(app.scroll().viewport_rows(), usize::from(TEST_HEIGHT - 1));
        assert!(app.scroll().content_rows() > app.scroll().viewport_rows());
    }

    #[test]
    fn test_scroll_actions() {
        let mut app = create_test_app();
        app.handle_action(Action::Down);
        assert_eq!(app.scroll().offset(), 1);
        app.handle_action(Action::WheelDown);
        assert_eq!(app.scroll().offset(), 1 + SCROLL_SPEED);
        app.handle_action(Action::Top);
        assert_eq!(app.scroll().offset(), 0);
        app.handle_action(Action::Bottom);
        assert_eq!(app.scroll().offset(), app.scroll().max_offset());
        app.handle_action(Action::PageUp);
        assert!(app.scroll().offset() < app.scroll().max_offset());
    }

    #[test]
    fn test_cycle_bullet() {
        let mut app = create_test_app();
        assert_eq!(app.timeline().style().bullet_kind, BulletKind::Diamond);
        app.handle_action(Action::CycleBullet);
        assert_eq!(
            app.timeline().style().bullet_kind,
            BulletKind::Diamond.next()
        );
    }

    #[test]
    fn test_toggle_direction() {
        let mut app = create_test_app();
        app.handle_action(Action::ToggleDirection);
        assert_eq!(app.timeline().layout().direction, LayoutDirection::Rtl);
        assert_eq!(app.status().direction, "rtl");
        app.handle_action(Action::ToggleDirection);
        assert_eq!(app.timeline().layout().direction, LayoutDirection::Ltr);
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_tap_image_cell_runs_callback_and_sets_notice() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut app = App::new(
            "test",
            StyleConfig::default(),
            vec![TimeFrame::new("January 1")
                .image(Image::new("fireworks.jpeg", 640, 480, Vec::new()))
                .on_image_tapped(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })],
        );
        app.resize(Rect::new(0, 0, 40, 20));

        // Image box spans layout x 34..300 and y 35..165.
        assert!(app.tap_cell(10, 5));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(app.notice(), Some("Tapped fireworks.jpeg (640x480)"));

        // Date label row, outside the image.
        assert!(!app.tap_cell(10, 0));
        // Status bar row.
        assert!(!app.tap_cell(10, 19));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tap_ignored_while_too_small() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut app = App::new(
            "test",
            StyleConfig::default(),
            vec![TimeFrame::new("January 1")
                .image(Image::new("fireworks.jpeg", 640, 480, Vec::new()))
                .on_image_tapped(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })],
        );
        // Tall enough to reach the image rows but too narrow to draw.
        app.resize(Rect::new(0, 0, MIN_WIDTH - 1, 20));
        assert!(!app.tap_cell(10, 5));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(app.notice(), None);

        app.resize(Rect::new(0, 0, 40, 20));
        assert!(app.tap_cell(10, 5));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tap_follows_scroll() {
        let mut app = App::new(
            "test",
            StyleConfig::default(),
            vec![TimeFrame::new("January 1").image(Image::new("a.png", 1, 1, Vec::new()))],
        );
        app.resize(Rect::new(0, 0, 40, 20));
        assert!(app.tap_cell(10, 5));
        app.handle_action(Action::WheelDown);
        app.handle_action(Action::WheelDown);
        // Content row 11 is below the image.
        assert!(!app.tap_cell(10, 5));
    }

    #[test]
    fn test_render_shows_labels_and_status() {
        let app = create_test_app();
        let result = render_app_to_string(&app, TEST_WIDTH, TEST_HEIGHT);
        assert!(result.contains("January 1"));
        assert!(result.contains("New Year's Day"));
        assert!(result.contains("● holidays │ diamond │ ltr │ 0%"));
    }

    #[test]
    fn test_render_too_small() {
        let app = create_test_app();
        let result = render_app_to_string(&app, 10, 3);
        assert!(result.contains("Terminal"));
    }
}
