//! Screen composition.
//!
//! `screen` is a pure function of layout, terminal size, viewport and grid:
//! it returns one styled line per terminal row, each exactly as wide as the
//! terminal. `draw` hands those lines to ratatui.

use ratatui::{
    layout::Size,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use retrocalc_engine::address::{cell_ref, col_to_letters};
use retrocalc_engine::cell::{Cell, CellValue};
use retrocalc_engine::grid::Grid;
use retrocalc_engine::{MAX_COLS, MAX_ROWS};

use super::viewport::{GridLayout, Mode, Viewport, HEADER_ROWS};
use crate::util;

fn reverse() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Build every terminal row for the current state.
pub fn screen(layout: &GridLayout, size: Size, view: &Viewport, grid: &Grid) -> Vec<Line<'static>> {
    let width = size.width as usize;
    let height = size.height as usize;
    let cols = layout.window(size).cols;

    let mut lines = Vec::with_capacity(height.max(HEADER_ROWS));
    lines.push(status_line(view, grid, width));
    lines.push(fit(vec![Span::styled(mode_text(view), reverse())], width, reverse()));
    lines.push(fit(vec![Span::raw(input_text(view))], width, Style::default()));
    lines.push(header_line(layout, view.scroll_col, cols, width));

    for i in 0..height.saturating_sub(HEADER_ROWS) {
        let row = view.scroll_row + i;
        if row >= MAX_ROWS {
            lines.push(fit(Vec::new(), width, Style::default()));
        } else {
            lines.push(grid_line(layout, view, grid, row, cols, width));
        }
    }

    lines.truncate(height);
    lines
}

/// Render the grid screen into a ratatui frame.
pub fn draw(frame: &mut Frame, layout: &GridLayout, view: &Viewport, grid: &Grid) {
    let area = frame.area();
    let lines = screen(layout, Size::new(area.width, area.height), view, grid);
    frame.render_widget(Paragraph::new(lines), area);
}

/// ` A1 fmt   (V)   raw` on the left, calc order and a space on the right.
fn status_line(view: &Viewport, grid: &Grid, width: usize) -> Line<'static> {
    let cell = grid.get(view.cursor_row, view.cursor_col);
    let indicator = cell.kind().map(|k| k.indicator()).unwrap_or('V');
    let info = format!(
        " {} {}   ({})   {}",
        cell_ref(view.cursor_row, view.cursor_col),
        cell.format,
        indicator,
        cell.value.raw_text()
    );

    let text = if width >= 2 {
        format!(
            "{}{} ",
            util::pad_right(&info, width - 2),
            grid.calc_order().indicator()
        )
    } else {
        info
    };
    fit(vec![Span::styled(text, reverse())], width, reverse())
}

fn mode_text(view: &Viewport) -> &'static str {
    if let Some(kind) = view.input_kind() {
        return kind.label();
    }
    match view.mode {
        Mode::Command if view.buffer == "/S" => "STORAGE: L S Q",
        Mode::Command => "COMMAND: B C E G S -",
        Mode::FileName(_) => "Enter file name",
        Mode::Normal | Mode::Goto | Mode::Editing(_) => "",
    }
}

fn input_text(view: &Viewport) -> String {
    match view.mode {
        Mode::Normal => view.message.clone().unwrap_or_default(),
        _ => view.buffer.clone(),
    }
}

fn header_line(layout: &GridLayout, scroll_col: usize, cols: usize, width: usize) -> Line<'static> {
    let mut spans = vec![Span::styled(" ".repeat(layout.gutter_width), reverse())];
    for col in scroll_col..scroll_col + cols {
        let label = if col < MAX_COLS {
            col_to_letters(col)
        } else {
            String::new()
        };
        spans.push(Span::styled(util::center(&label, layout.column_width), reverse()));
    }
    fit(spans, width, reverse())
}

fn grid_line(
    layout: &GridLayout,
    view: &Viewport,
    grid: &Grid,
    row: usize,
    cols: usize,
    width: usize,
) -> Line<'static> {
    let gutter = util::pad_left(&(row + 1).to_string(), layout.gutter_width);
    let mut spans = vec![Span::styled(gutter, reverse())];

    for col in view.scroll_col..view.scroll_col + cols {
        let text = match grid.cell(row, col) {
            Some(cell) if col < MAX_COLS => cell_text(cell, layout.column_width),
            _ => " ".repeat(layout.column_width),
        };
        let style = if row == view.cursor_row && col == view.cursor_col {
            reverse()
        } else {
            Style::default()
        };
        spans.push(Span::styled(text, style));
    }
    fit(spans, width, Style::default())
}

/// Cell contents fitted to exactly `width` columns.
fn cell_text(cell: &Cell, width: usize) -> String {
    match &cell.value {
        CellValue::Empty => " ".repeat(width),
        CellValue::Value { .. } => util::pad_left(&cell.value.display_text(), width),
        CellValue::Label(_) => util::pad_right(&cell.value.display_text(), width),
        CellValue::Repeating(ch) => {
            let fill: String = std::iter::repeat(*ch).take(width).collect();
            util::pad_right(&fill, width)
        }
    }
}

/// Clip spans to `width` columns and pad what is left with `fill`.
fn fit(spans: Vec<Span<'static>>, width: usize, fill: Style) -> Line<'static> {
    let mut used = 0;
    let mut out = Vec::with_capacity(spans.len() + 1);
    for span in spans {
        if used >= width {
            break;
        }
        let text = util::truncate_display(&span.content, width - used).to_string();
        used += util::display_width(&text);
        out.push(Span::styled(text, span.style));
    }
    if used < width {
        out.push(Span::styled(" ".repeat(width - used), fill));
    }
    Line::from(out)
}
