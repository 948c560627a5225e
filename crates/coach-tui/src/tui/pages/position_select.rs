// Position picker: one tile per position, selected tile highlighted.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use coach_core::position::Position;
use coach_core::stats::processor::attribute_names;

use crate::app::PositionSelect;

const TILE_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame, area: Rect, state: &PositionSelect) {
    let rows = Layout::vertical([Constraint::Length(TILE_HEIGHT.min(area.height))]).split(area);
    let tiles = Layout::horizontal([Constraint::Ratio(1, Position::ALL.len() as u32); 4]).split(rows[0]);
    let selected = state.selected();

    for (position, tile) in Position::ALL.iter().zip(tiles.iter()) {
        let is_selected = *position == selected;
        let border = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut lines = vec![Line::raw("")];
        lines.extend(attribute_names(*position).into_iter().map(Line::raw));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(position.title()),
        );
        frame.render_widget(paragraph, *tile);
    }
}
