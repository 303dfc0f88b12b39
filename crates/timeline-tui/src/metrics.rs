//! Terminal cell geometry.
//!
//! The engine lays out in abstract units. In a terminal every glyph is one
//! cell regardless of font size, so [`CellMetrics`] measures text in whole
//! cells and converts between cells and layout units.

use timeline_engine::text::wrap_to_columns;
use timeline_engine::{LabelStyle, Point, TextBlock, TextMeasure};

/// Size of one terminal cell in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl CellMetrics {
    /// Layout width of `columns` cells.
    pub fn width_of(&self, columns: u16) -> f64 {
        f64::from(columns) * self.cell_width
    }

    /// Number of rows needed to show `height` layout units.
    pub fn rows_for(&self, height: f64) -> usize {
        if height.is_finite() && height > 0.0 {
            (height / self.cell_height).ceil() as usize
        } else {
            0
        }
    }

    /// Centre of the cell at `column`, `row`, in layout units.
    pub fn cell_center(&self, column: u16, row: usize) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }
}

impl TextMeasure for CellMetrics {
    fn measure(&self, text: &str, max_width: f64, _style: &LabelStyle) -> TextBlock {
        wrap_to_columns(text, max_width, self.cell_width, self.cell_height)
    }
}
