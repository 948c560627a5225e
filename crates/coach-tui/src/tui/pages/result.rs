// Result page: user ratings against the baseline, worst deficit first.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::ResultView;

/// Green at or above the baseline, red below.
pub fn deficit_color(deficit: i64) -> Color {
    if deficit < 0 {
        Color::Red
    } else {
        Color::Green
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &ResultView) {
    let [summary_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    let shortfalls = state.recommendation.candidates.len();
    let summary = if shortfalls == 0 {
        Line::from(Span::styled(
            "At or above the baseline on every attribute.",
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!("{shortfalls} attribute(s) below the baseline. "),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "{} drill(s) found, press Enter to see them.",
                state.recommendation.entries.len()
            )),
        ])
    };
    let title = format!("{} vs top players", state.profile.position().title());
    frame.render_widget(
        Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title(title)),
        summary_area,
    );

    let header = Row::new(vec![
        Cell::from("Attribute"),
        Cell::from("You"),
        Cell::from("Baseline"),
        Cell::from("Deficit"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = state
        .sorted_deficits()
        .into_iter()
        .map(|d| {
            Row::new(vec![
                Cell::from(d.attribute.clone()),
                Cell::from(d.user_value.to_string()),
                Cell::from(d.baseline.to_string()),
                Cell::from(format!("{:+}", d.deficit))
                    .style(Style::default().fg(deficit_color(d.deficit))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(22),
        Constraint::Length(5),
        Constraint::Length(9),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Comparison"));
    frame.render_widget(table, table_area);
}
