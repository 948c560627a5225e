// Recommendation cards: one training drill at a time.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::Recommendations;

pub fn render(frame: &mut Frame, area: Rect, state: &Recommendations) {
    let [focus_area, card_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(5)]).areas(area);

    let focus = if state.candidates.is_empty() {
        Line::raw("Nothing to work on, every attribute meets the baseline.")
    } else {
        Line::from(vec![
            Span::styled("Focus: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(state.candidates.join(", ")),
        ])
    };
    frame.render_widget(
        Paragraph::new(focus).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} training", state.position.title())),
        ),
        focus_area,
    );

    let Some(entry) = state.selected() else {
        let message = if state.candidates.is_empty() {
            "No training needed."
        } else {
            "No training in the repository targets these attributes."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL)),
            card_area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Targets: ", Style::default().fg(Color::Cyan)),
            Span::raw(entry.attributes.join(", ")),
        ]),
        Line::raw(""),
    ];
    lines.extend(entry.description.lines().map(|l| Line::raw(l.to_string())));

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                entry.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(format!(" Card {}/{} ", state.cursor + 1, state.entries.len())),
    );
    frame.render_widget(card, card_area);
}
