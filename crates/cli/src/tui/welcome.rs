//! Title screen shown before the grid.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

const RULE: &str = "================================";

fn banner() -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(RULE),
        Line::styled("RETROCALC", bold),
        Line::from(RULE),
        Line::default(),
        Line::from("Electronic Spreadsheet"),
        Line::from(format!("Version {}", env!("CARGO_PKG_VERSION"))),
        Line::default(),
        Line::default(),
        Line::from("Press any key to continue..."),
    ]
}

pub fn draw(frame: &mut Frame) {
    let area = frame.area();
    let lines = banner();
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let target = Rect::new(area.x, top, area.width, height);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
}
