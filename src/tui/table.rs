//! Heat-mapped table view state
//!
//! Holds the loaded table, the most recently colored cells and the cursor.

use crate::heatmap::{ApplyReport, RenderedTable, StyledCell};
use crate::table::HeatTable;

/// Viewer state for one table
#[derive(Debug, Clone)]
pub struct TableView {
    /// The table as loaded, without styles
    pub table: HeatTable,

    /// Colored cells from the last render pass, row-major like `table.cells`
    pub colored: Option<Vec<StyledCell>>,

    /// Report of the last render pass
    pub report: Option<ApplyReport>,

    /// Current cursor position (row_idx, col_idx)
    pub cursor: (usize, usize),

    /// First visible row
    pub scroll_offset: usize,
}

impl TableView {
    pub fn new(table: HeatTable) -> Self {
        Self {
            table,
            colored: None,
            report: None,
            cursor: (0, 0),
            scroll_offset: 0,
        }
    }

    /// Take the output of a render pass
    pub fn set_rendered(&mut self, rendered: RenderedTable<StyledCell>) {
        self.colored = Some(rendered.content.cells);
        self.report = Some(rendered.report);
    }

    /// The cell to draw at (row, col), colored if a pass has completed
    pub fn display_cell(&self, row: usize, col: usize) -> Option<&StyledCell> {
        match &self.colored {
            Some(cells) if row < self.table.nrows && col < self.table.ncols() => {
                cells.get(row * self.table.ncols() + col)
            }
            _ => self.table.cell(row, col),
        }
    }

    pub fn current_cell(&self) -> Option<&StyledCell> {
        self.display_cell(self.cursor.0, self.cursor.1)
    }

    /// Keep the cursor row within `visible_rows` rows of the scroll offset
    pub fn ensure_cursor_visible(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.cursor.0 < self.scroll_offset {
            self.scroll_offset = self.cursor.0;
        } else if self.cursor.0 >= self.scroll_offset + visible_rows {
            self.scroll_offset = self.cursor.0 + 1 - visible_rows;
        }
    }

    /// Move cursor up
    pub fn cursor_up(&mut self) {
        if self.cursor.0 > 0 {
            self.cursor.0 -= 1;
        }
    }

    /// Move cursor down
    pub fn cursor_down(&mut self) {
        if self.cursor.0 < self.table.nrows.saturating_sub(1) {
            self.cursor.0 += 1;
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        if self.cursor.1 > 0 {
            self.cursor.1 -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor.1 < self.table.ncols().saturating_sub(1) {
            self.cursor.1 += 1;
        }
    }
}
