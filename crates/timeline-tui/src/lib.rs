//! timeline-tui: Terminal renderer and viewer for timeline layouts
//!
//! This crate draws a computed layout into a ratatui buffer:
//! - Braille canvas for the connecting line, bullets and image boxes
//! - Cell metrics so labels wrap to whole terminal columns
//! - Scrolling, bullet cycling, direction toggling and image taps

mod app;
mod event;
mod metrics;
mod status_bar;
#[cfg(test)]
pub mod test_utils;
mod theme;
mod viewer;

pub use app::App;
pub use event::{key_to_action, mouse_to_action, Action, Event, EventHandler};
pub use metrics::CellMetrics;
pub use status_bar::{StatusBar, StatusBarContent};
pub use theme::{to_terminal, Theme};
pub use timeline_engine;
pub use viewer::{ScrollState, TimelineWidget, SCROLL_SPEED};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the viewer until the user quits.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit, including when the loop fails.
pub fn run_viewer(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.resize(Rect::new(0, 0, size.width, size.height));
    tracing::debug!(width = size.width, height = size.height, "Viewer started");

    // 4 Hz tick rate
    let events = EventHandler::new(250);
    let result = run_loop(&mut terminal, &mut app, events);

    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(area, frame.buffer_mut());
        })?;

        match events.next()? {
            Event::Key(key) => app.handle_action(key_to_action(key)),
            Event::Mouse(mouse) => app.handle_action(mouse_to_action(mouse)),
            Event::Resize(width, height) => app.resize(Rect::new(0, 0, width, height)),
            Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
