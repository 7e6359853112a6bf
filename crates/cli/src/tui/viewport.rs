//! Cursor, scroll window and interaction mode.
//!
//! The visible window is derived from the terminal size on every frame and
//! never stored, so a resize is picked up by the next `ensure_visible`.

use ratatui::layout::Size;
use retrocalc_config::settings::{Settings, MIN_COLUMN_WIDTH};
use retrocalc_engine::cell::CellKind;
use retrocalc_engine::{MAX_COLS, MAX_ROWS};

/// Screen rows above the grid: status, mode, input, column header.
pub const HEADER_ROWS: usize = 4;

/// Narrowest gutter that still fits row 256.
pub const MIN_GUTTER_WIDTH: usize = 3;

/// Fixed column geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub column_width: usize,
    pub gutter_width: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            column_width: 9,
            gutter_width: 3,
        }
    }
}

impl GridLayout {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            column_width: settings.column_width.max(MIN_COLUMN_WIDTH),
            gutter_width: settings.row_label_width.max(MIN_GUTTER_WIDTH),
        }
    }

    /// Number of grid rows and columns that fit in a terminal of `size`.
    pub fn window(&self, size: Size) -> Window {
        let rows = (size.height as usize).saturating_sub(HEADER_ROWS);
        let cols = (size.width as usize).saturating_sub(self.gutter_width) / self.column_width;
        Window {
            rows: rows.clamp(1, MAX_ROWS),
            cols: cols.clamp(1, MAX_COLS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Save,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Slash-command entry; the buffer holds the typed command.
    Command,
    Editing(CellKind),
    /// Go-to-address prompt.
    Goto,
    /// File name prompt for a save or load.
    FileName(FileAction),
}

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub scroll_row: usize,
    pub scroll_col: usize,
    pub mode: Mode,
    pub buffer: String,
    /// One-shot feedback line, cleared by the next key.
    pub message: Option<String>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_up(&mut self, window: Window) {
        self.cursor_row = self.cursor_row.saturating_sub(1);
        self.ensure_visible(window);
    }

    pub fn move_down(&mut self, window: Window) {
        if self.cursor_row + 1 < MAX_ROWS {
            self.cursor_row += 1;
        }
        self.ensure_visible(window);
    }

    pub fn move_left(&mut self, window: Window) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
        self.ensure_visible(window);
    }

    pub fn move_right(&mut self, window: Window) {
        if self.cursor_col + 1 < MAX_COLS {
            self.cursor_col += 1;
        }
        self.ensure_visible(window);
    }

    /// Jump to `(row, col)`; out-of-range targets are ignored.
    pub fn goto(&mut self, row: usize, col: usize, window: Window) {
        if row >= MAX_ROWS || col >= MAX_COLS {
            return;
        }
        self.cursor_row = row;
        self.cursor_col = col;
        self.ensure_visible(window);
    }

    pub fn home(&mut self) {
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    /// Minimal scroll: move the window only as far as needed to show the cursor.
    pub fn ensure_visible(&mut self, window: Window) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.cursor_row >= self.scroll_row + window.rows {
            self.scroll_row = self.cursor_row + 1 - window.rows;
        }

        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + window.cols {
            self.scroll_col = self.cursor_col + 1 - window.cols;
        }
    }

    pub fn cursor_visible(&self, window: Window) -> bool {
        (self.scroll_row..self.scroll_row + window.rows).contains(&self.cursor_row)
            && (self.scroll_col..self.scroll_col + window.cols).contains(&self.cursor_col)
    }

    /// Enter `mode` with a pre-filled buffer.
    pub fn begin(&mut self, mode: Mode, buffer: impl Into<String>) {
        self.mode = mode;
        self.buffer = buffer.into();
    }

    /// Back to normal mode, discarding any typed input.
    pub fn reset_input(&mut self) {
        self.mode = Mode::Normal;
        self.buffer.clear();
    }

    /// Entry kind while editing a cell.
    pub fn input_kind(&self) -> Option<CellKind> {
        match self.mode {
            Mode::Editing(kind) => Some(kind),
            _ => None,
        }
    }
}
