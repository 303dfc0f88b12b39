//! Event handling for the timeline viewer.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use std::io;
use std::time::Duration;

/// Events that can occur in the viewer.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// No input arrived within the tick interval.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Polls crossterm on the calling thread.
#[derive(Debug, Clone, Copy)]
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Wait up to one tick for the next event.
    pub fn next(&self) -> io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        })
    }
}

/// Viewer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// Switch to the next bullet kind.
    CycleBullet,
    /// Flip between left-to-right and right-to-left.
    ToggleDirection,
    /// Mouse wheel, scrolled by [`crate::viewer::SCROLL_SPEED`] rows.
    WheelUp,
    WheelDown,
    /// Tap at a terminal cell (column, row).
    Tap(u16, u16),
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    // Check for Ctrl+C first
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::Char('b') => Action::CycleBullet,
        KeyCode::Char('r') => Action::ToggleDirection,
        _ => Action::None,
    }
}

/// Convert a mouse event to an action.
pub fn mouse_to_action(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::WheelUp,
        MouseEventKind::ScrollDown => Action::WheelDown,
        MouseEventKind::Down(MouseButton::Left) => Action::Tap(mouse.column, mouse.row),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(key_to_action(key(KeyCode::Up)), Action::Up);
        assert_eq!(key_to_action(key(KeyCode::Char('k'))), Action::Up);
        assert_eq!(key_to_action(key(KeyCode::Char('j'))), Action::Down);
        assert_eq!(key_to_action(key(KeyCode::PageDown)), Action::PageDown);
        assert_eq!(key_to_action(key(KeyCode::PageUp)), Action::PageUp);
        assert_eq!(key_to_action(key(KeyCode::Home)), Action::Top);
        assert_eq!(key_to_action(key(KeyCode::End)), Action::Bottom);
    }

    #[test]
    fn test_style_keys() {
        assert_eq!(key_to_action(key(KeyCode::Char('b'))), Action::CycleBullet);
        assert_eq!(key_to_action(key(KeyCode::Char('r'))), Action::ToggleDirection);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_mouse_actions() {
        assert_eq!(mouse_to_action(mouse(MouseEventKind::ScrollUp, 0, 0)), Action::WheelUp);
        assert_eq!(
            mouse_to_action(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Action::WheelDown
        );
        assert_eq!(
            mouse_to_action(mouse(MouseEventKind::Down(MouseButton::Left), 7, 3)),
            Action::Tap(7, 3)
        );
        assert_eq!(
            mouse_to_action(mouse(MouseEventKind::Moved, 7, 3)),
            Action::None
        );
    }
}
