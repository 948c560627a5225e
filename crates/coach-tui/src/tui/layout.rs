// Screen layout shared by every page.
//
// +--------------------------------------------------+
// | Title bar (1 row)                                 |
// +--------------------------------------------------+
// | Page body (fill)                                  |
// +--------------------------------------------------+
// | Status line (1 row)                               |
// | Help bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Resolved screen areas.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Application name, season and current page.
    pub title_bar: Rect,
    pub body: Rect,
    /// Last error or notice.
    pub status_line: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(5),    // page body
            Constraint::Length(1), // status line
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        title_bar: vertical[0],
        body: vertical[1],
        status_line: vertical[2],
        help_bar: vertical[3],
    }
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
