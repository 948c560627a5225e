// Data input page: a 0-100 slider per attribute of the chosen position.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use coach_core::recommend::MAX_SCORE;

use crate::app::DataInput;

/// Characters in a full slider.
const SLIDER_WIDTH: usize = 25;

/// Text slider for `value` out of `MAX_SCORE`.
pub fn slider(value: u8) -> String {
    let filled = usize::from(value) * SLIDER_WIDTH / usize::from(MAX_SCORE);
    format!("{}{}", "█".repeat(filled), "░".repeat(SLIDER_WIDTH - filled))
}

pub fn render(frame: &mut Frame, area: Rect, state: &DataInput) {
    let header = Row::new(vec![Cell::from("Attribute"), Cell::from("Value"), Cell::from("")])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .profile
        .values()
        .iter()
        .map(|(name, value)| {
            Row::new(vec![
                Cell::from(name.clone()),
                Cell::from(format!("{value:>3}")),
                Cell::from(slider(*value)).style(Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(22),
        Constraint::Length(6),
        Constraint::Length(SLIDER_WIDTH as u16),
    ];
    let title = format!("{} ratings", state.position().title());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}
