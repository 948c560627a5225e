// Welcome page: title and how to start.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use coach_core::season::Season;

use crate::tui::layout::centered_rect;

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 11;

pub fn render(frame: &mut Frame, area: Rect, season: Season) {
    let card = centered_rect(CARD_WIDTH, CARD_HEIGHT, area);
    let lines = vec![
        Line::from(Span::styled(
            "Personalized Coaching Assistant",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw("Rate your player from 0 to 100 on the attributes that"),
        Line::raw("matter for their position. Ratings are compared with the"),
        Line::raw(format!("top Premier League players of {season}, and training")),
        Line::raw("drills are suggested for every attribute below par."),
        Line::raw(""),
        Line::from(Span::styled(
            "Press Enter to start",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, card);
}
