// Keyboard input handling.
//
// Translates crossterm key events into page-independent `Action`s. The
// state machine decides what each action means on the current page.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Action, Page};

/// Decode a key press. `None` for keys with no meaning on `page`.
pub fn handle_key(key_event: KeyEvent, page: &Page) -> Option<Action> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key_event.code {
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char('h') if matches!(page, Page::Recommendations(_)) => Some(Action::Home),
        // Entered values would be lost, so `q` is inert while rating.
        KeyCode::Char('q') if !matches!(page, Page::DataInput(_)) => Some(Action::Quit),
        _ => None,
    }
}

/// Key hints for the help bar.
pub fn help_text(page: &Page) -> &'static str {
    match page {
        Page::Welcome => " Enter:Start | q:Quit",
        Page::PositionSelect(_) => " ←/→:Position | Enter:Select | Esc:Back | q:Quit",
        Page::DataInput(_) => " ↑/↓:Attribute | ←/→:±1 | PgUp/PgDn:±10 | Enter:Compare | Esc:Back",
        Page::Result(_) => " Enter:Training | Esc:Re-rate | q:Quit",
        Page::Recommendations(_) => " ←/→:Card | Esc:Re-rate | h:Positions | q:Quit",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DataInput, PositionSelect, Recommendations};
    use coach_core::position::Position;
    use coach_core::recommend::UserProfile;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn data_input() -> Page {
        Page::DataInput(DataInput {
            profile: UserProfile::new(Position::Defender, ["Duels"]),
            cursor: 0,
        })
    }

    fn recommendations() -> Page {
        Page::Recommendations(Recommendations {
            position: Position::Defender,
            candidates: vec![],
            entries: vec![],
            cursor: 0,
        })
    }

    #[test]
    fn navigation_keys() {
        let page = Page::PositionSelect(PositionSelect { cursor: 0 });
        assert_eq!(handle_key(press(KeyCode::Enter), &page), Some(Action::Confirm));
        assert_eq!(handle_key(press(KeyCode::Esc), &page), Some(Action::Back));
        assert_eq!(handle_key(press(KeyCode::Left), &page), Some(Action::Left));
        assert_eq!(handle_key(press(KeyCode::Right), &page), Some(Action::Right));
        assert_eq!(handle_key(press(KeyCode::Up), &page), Some(Action::Up));
        assert_eq!(handle_key(press(KeyCode::Char('j')), &page), Some(Action::Down));
        assert_eq!(handle_key(press(KeyCode::PageUp), &page), Some(Action::PageUp));
        assert_eq!(handle_key(press(KeyCode::PageDown), &page), Some(Action::PageDown));
        assert_eq!(handle_key(press(KeyCode::Char('x')), &page), None);
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &Page::Welcome), Some(Action::Quit));
        assert_eq!(handle_key(ctrl_c, &data_input()), Some(Action::Quit));
    }

    #[test]
    fn q_is_inert_during_data_input() {
        assert_eq!(handle_key(press(KeyCode::Char('q')), &Page::Welcome), Some(Action::Quit));
        assert_eq!(handle_key(press(KeyCode::Char('q')), &data_input()), None);
    }

    #[test]
    fn home_only_on_recommendations() {
        assert_eq!(handle_key(press(KeyCode::Char('h')), &recommendations()), Some(Action::Home));
        assert_eq!(handle_key(press(KeyCode::Char('h')), &Page::Welcome), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(release, &Page::Welcome), None);
    }

    #[test]
    fn every_page_has_help() {
        for page in [Page::Welcome, data_input(), recommendations()] {
            assert!(!help_text(&page).trim().is_empty());
        }
    }
}
