//! Scroll state for the timeline viewport.
//!
//! Offsets are whole terminal rows from the top of the content.

/// Rows scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Viewport scroll state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// First visible content row.
    offset: usize,
    /// Total content rows.
    content_rows: usize,
    /// Rows the viewport can show.
    viewport_rows: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Largest valid offset: the last page ends at the last content row.
    pub fn max_offset(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    /// Update the content and viewport sizes, keeping the offset in range.
    pub fn resize(&mut self, content_rows: usize, viewport_rows: usize) {
        self.content_rows = content_rows;
        self.viewport_rows = viewport_rows;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll up by the given number of rows.
    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    /// Scroll down by the given number of rows.
    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = (self.offset + amount).min(self.max_offset());
    }

    /// Scroll up by a page, keeping one row of overlap.
    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    /// Scroll down by a page, keeping one row of overlap.
    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    pub fn jump_to_start(&mut self) {
        self.offset = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.offset = self.max_offset();
    }

    /// Convert a viewport row to a content row, if it shows content.
    pub fn row_to_content(&self, row: usize) -> Option<usize> {
        if row >= self.viewport_rows {
            return None;
        }
        let content_row = self.offset + row;
        (content_row < self.content_rows).then_some(content_row)
    }

    fn page_size(&self) -> usize {
        self.viewport_rows.saturating_sub(1).max(1)
    }
}
