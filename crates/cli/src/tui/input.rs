//! Key handling: the normal/editing/goto/command state machine.

use std::path::PathBuf;

use retrocalc_engine::address::parse_cell_ref;
use retrocalc_engine::cell::{Cell, CellKind, CellValue};
use retrocalc_engine::grid::{CalcOrder, Grid};
use retrocalc_io::native;

use super::keys::Key;
use super::viewport::{FileAction, Mode, Viewport, Window};

/// Slash commands reachable from the command overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ClearCell,
    ClearAll,
    EditExisting,
    Repeating,
    CalcByColumn,
    CalcByRow,
    Save,
    Load,
    Quit,
}

const COMMANDS: &[(&str, Command)] = &[
    ("/B", Command::ClearCell),
    ("/C", Command::ClearAll),
    ("/E", Command::EditExisting),
    ("/-", Command::Repeating),
    ("/GOC", Command::CalcByColumn),
    ("/GOR", Command::CalcByRow),
    ("/SS", Command::Save),
    ("/SL", Command::Load),
    ("/SQ", Command::Quit),
];

/// What a partially typed command buffer refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Complete(Command),
    /// A prefix of at least one command; keep reading.
    Partial,
    Unknown,
}

/// Match an upper-cased command buffer (including its leading `/`).
pub fn resolve(buffer: &str) -> Resolution {
    if let Some((_, cmd)) = COMMANDS.iter().find(|(keys, _)| *keys == buffer) {
        return Resolution::Complete(*cmd);
    }
    if COMMANDS.iter().any(|(keys, _)| keys.starts_with(buffer)) {
        Resolution::Partial
    } else {
        Resolution::Unknown
    }
}

fn starts_value(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | '.' | '#' | '@')
}

fn starts_label(c: char) -> bool {
    c.is_alphabetic() || c == '\''
}

/// Whole editor session state.
#[derive(Debug, Default)]
pub struct App {
    pub grid: Grid,
    pub view: Viewport,
    /// Target of `/SS`; set by a successful save or load.
    pub current_file: Option<PathBuf>,
    pub should_quit: bool,
}

impl App {
    pub fn new(grid: Grid, current_file: Option<PathBuf>) -> Self {
        Self {
            grid,
            current_file,
            ..Self::default()
        }
    }

    /// Process one key. `window` is the grid area currently on screen.
    pub fn handle_key(&mut self, key: Key, window: Window) {
        self.view.message = None;

        match self.view.mode {
            Mode::Normal => self.handle_normal(key, window),
            Mode::Command => self.handle_command(key),
            Mode::Editing(_) | Mode::Goto | Mode::FileName(_) => self.handle_text(key, window),
        }
    }

    fn handle_normal(&mut self, key: Key, window: Window) {
        match key {
            Key::Char('>') => self.view.begin(Mode::Goto, ""),
            Key::Char('/') => self.view.begin(Mode::Command, "/"),
            Key::Char(c) if starts_value(c) => {
                self.view.begin(Mode::Editing(CellKind::Value), c.to_string())
            }
            Key::Char(c) if starts_label(c) => {
                self.view.begin(Mode::Editing(CellKind::Label), c.to_string())
            }
            Key::Up => self.view.move_up(window),
            Key::Down => self.view.move_down(window),
            Key::Left => self.view.move_left(window),
            Key::Right => self.view.move_right(window),
            Key::F1 => self.view.home(),
            Key::F2 => self.edit_existing(),
            _ => {}
        }
    }

    fn handle_command(&mut self, key: Key) {
        match key {
            Key::Escape => self.view.reset_input(),
            Key::Backspace => {
                if self.view.buffer.chars().count() <= 1 {
                    self.view.reset_input();
                } else {
                    self.view.buffer.pop();
                }
            }
            Key::Char(' ') => {}
            Key::Char(c) => {
                self.view.buffer.extend(c.to_uppercase());
                match resolve(&self.view.buffer) {
                    Resolution::Complete(cmd) => {
                        self.view.reset_input();
                        self.run_command(cmd);
                    }
                    Resolution::Partial => {}
                    Resolution::Unknown => {
                        tracing::debug!(buffer = %self.view.buffer, "unknown command");
                        self.view.reset_input();
                        self.view.message = Some("Unknown command".to_string());
                    }
                }
            }
            _ => {}
        }
    }

    /// Shared line editing for cell entry, goto and the file name prompt.
    fn handle_text(&mut self, key: Key, window: Window) {
        match key {
            Key::Char(c) => self.view.buffer.push(c),
            Key::Backspace => {
                self.view.buffer.pop();
            }
            Key::Escape => self.view.reset_input(),
            Key::Enter => {
                let mode = self.view.mode;
                let text = std::mem::take(&mut self.view.buffer);
                self.view.reset_input();
                match mode {
                    Mode::Editing(kind) => self.commit(kind, &text),
                    Mode::Goto => self.goto(&text, window),
                    Mode::FileName(action) => self.file_action(action, &text),
                    Mode::Normal | Mode::Command => {}
                }
            }
            _ => {}
        }
    }

    fn run_command(&mut self, cmd: Command) {
        tracing::debug!(?cmd, "command");
        let (row, col) = (self.view.cursor_row, self.view.cursor_col);
        match cmd {
            Command::ClearCell => self.grid.clear(row, col),
            Command::ClearAll => self.grid.clear_all(),
            Command::EditExisting => self.edit_existing(),
            Command::Repeating => self.view.begin(Mode::Editing(CellKind::Repeating), ""),
            Command::CalcByColumn => self.grid.set_calc_order(CalcOrder::Column),
            Command::CalcByRow => self.grid.set_calc_order(CalcOrder::Row),
            Command::Save => match self.current_file.clone() {
                Some(path) => self.save_to(path),
                None => self.view.begin(Mode::FileName(FileAction::Save), ""),
            },
            Command::Load => self.view.begin(Mode::FileName(FileAction::Load), ""),
            Command::Quit => self.should_quit = true,
        }
    }

    /// Re-enter the cursor cell's text for editing, minus its last character.
    fn edit_existing(&mut self) {
        let cell = self.grid.get(self.view.cursor_row, self.view.cursor_col);
        let Some(kind) = cell.kind() else {
            return;
        };
        let mut seed = cell.value.raw_text();
        seed.pop();
        self.view.begin(Mode::Editing(kind), seed);
    }

    /// Store `text` as a cell of `kind` at the cursor. Empty input stores nothing.
    fn commit(&mut self, kind: CellKind, text: &str) {
        let value = CellValue::from_kind(kind, text);
        if value.is_empty() {
            return;
        }
        let (row, col) = (self.view.cursor_row, self.view.cursor_col);
        let format = self.grid.get(row, col).format;
        self.grid.set(row, col, Cell::new(value).with_format(format));
    }

    fn goto(&mut self, text: &str, window: Window) {
        match parse_cell_ref(text.trim()) {
            Ok((row, col)) => self.view.goto(row, col, window),
            Err(e) => {
                tracing::debug!("goto failed: {}", e);
                self.view.message = Some("Invalid address".to_string());
            }
        }
    }

    fn file_action(&mut self, action: FileAction, text: &str) {
        let name = text.trim();
        if name.is_empty() {
            return;
        }
        let path = PathBuf::from(name);
        match action {
            FileAction::Save => self.save_to(path),
            FileAction::Load => self.load_from(path),
        }
    }

    pub fn save_to(&mut self, path: PathBuf) {
        match native::save(&self.grid, &path) {
            Ok(()) => {
                self.view.message = Some(format!("Saved {}", path.display()));
                self.current_file = Some(path);
            }
            Err(e) => {
                tracing::warn!("save failed: {}", e);
                self.view.message = Some(e.to_string());
            }
        }
    }

    /// Replace the grid with the sheet at `path`. On failure the grid is untouched.
    pub fn load_from(&mut self, path: PathBuf) {
        match native::load(&path) {
            Ok(grid) => {
                self.grid = grid;
                self.view.message = Some(format!("Loaded {}", path.display()));
                self.current_file = Some(path);
            }
            Err(e) => {
                tracing::warn!("load failed: {}", e);
                self.view.message = Some(e.to_string());
            }
        }
    }
}
