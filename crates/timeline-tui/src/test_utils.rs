//! Test utilities for timeline-tui rendering tests.

use crate::app::App;
use ratatui::{buffer::Buffer, layout::Rect};
use timeline_engine::{Image, StyleConfig, TimeFrame};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 40;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// A few holidays, one with an image.
pub fn sample_events() -> Vec<TimeFrame> {
    vec![
        TimeFrame::new("January 1")
            .text("New Year's Day")
            .image(Image::new("fireworks.jpeg", 640, 480, Vec::new())),
        TimeFrame::new("March").text("Comes like a lion, leaves like a lamb"),
        TimeFrame::new("That's it!"),
    ]
}

/// Create a test app sized to the default test terminal.
pub fn create_test_app() -> App {
    let mut app = App::new("holidays", StyleConfig::default(), sample_events());
    app.resize(Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
    app
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// Trailing whitespace is trimmed from every line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render the app into a buffer of the given size and return it as a string.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.timeline().events().len(), 3);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
