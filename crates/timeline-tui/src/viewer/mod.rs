//! Timeline viewport: scroll state and the rendering widget.

mod state;
mod widget;

pub use state::{ScrollState, SCROLL_SPEED};
pub use widget::TimelineWidget;
