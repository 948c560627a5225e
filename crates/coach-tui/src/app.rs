// Page state machine for the coaching wizard.
//
// Welcome -> PositionSelect -> DataInput -> Result -> Recommendations
//
// Each page owns exactly the data it displays. `App::handle` applies one
// user action and either moves to another page, updates the current one, or
// asks the run loop to do something the state machine cannot (collect stats).

use tracing::{info, warn};

use coach_core::position::Position;
use coach_core::recommend::{Deficit, Recommendation, UserProfile, MAX_SCORE};
use coach_core::training::TrainingEntry;

use crate::data::{CoachData, DataError};

/// Step for PageUp/PageDown on the data input page.
pub const LARGE_STEP: i32 = 10;

/// User intent, already decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Confirm,
    Back,
    Home,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Quit,
}

/// Work the run loop must do on the state machine's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Collect stats for `position`, then replay `retry`.
    Collect { position: Position, retry: Action },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSelect {
    pub cursor: usize,
}

impl PositionSelect {
    pub fn selected(&self) -> Position {
        Position::ALL[self.cursor % Position::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInput {
    pub profile: UserProfile,
    pub cursor: usize,
}

impl DataInput {
    pub fn position(&self) -> Position {
        self.profile.position()
    }

    /// Move the selected attribute by `delta`, staying within 0-100.
    fn adjust(&mut self, delta: i32) {
        let Some((name, value)) = self.profile.values().get(self.cursor).cloned() else {
            return;
        };
        let updated = (i32::from(value) + delta).clamp(0, i32::from(MAX_SCORE));
        self.profile.set(&name, updated as u32);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub profile: UserProfile,
    pub recommendation: Recommendation,
}

impl ResultView {
    /// Deficits sorted worst first.
    pub fn sorted_deficits(&self) -> Vec<&Deficit> {
        let mut deficits: Vec<&Deficit> = self.recommendation.deficits.iter().collect();
        deficits.sort_by_key(|d| d.deficit);
        deficits
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendations {
    pub position: Position,
    pub candidates: Vec<String>,
    pub entries: Vec<TrainingEntry>,
    pub cursor: usize,
}

impl Recommendations {
    pub fn selected(&self) -> Option<&TrainingEntry> {
        self.entries.get(self.cursor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Welcome,
    PositionSelect(PositionSelect),
    DataInput(DataInput),
    Result(ResultView),
    Recommendations(Recommendations),
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Welcome => "Welcome",
            Page::PositionSelect(_) => "Choose a position",
            Page::DataInput(_) => "Rate your player",
            Page::Result(_) => "Comparison",
            Page::Recommendations(_) => "Recommended training",
        }
    }
}

pub struct App {
    pub page: Page,
    /// Last error or notice, shown in the status line.
    pub status: Option<String>,
    pub should_quit: bool,
    data: CoachData,
}

impl App {
    pub fn new(data: CoachData) -> Self {
        App {
            page: Page::Welcome,
            status: None,
            should_quit: false,
            data,
        }
    }

    pub fn data(&self) -> &CoachData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut CoachData {
        &mut self.data
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Apply one action to the current page.
    pub fn handle(&mut self, action: Action) -> Effect {
        if action == Action::Quit {
            self.should_quit = true;
            return Effect::None;
        }

        let page = std::mem::replace(&mut self.page, Page::Welcome);
        let before = std::mem::discriminant(&page);
        let (next, effect) = match page {
            Page::Welcome => (self.on_welcome(action), Effect::None),
            Page::PositionSelect(state) => self.on_position_select(state, action),
            Page::DataInput(state) => (self.on_data_input(state, action), Effect::None),
            Page::Result(state) => (self.on_result(state, action), Effect::None),
            Page::Recommendations(state) => (self.on_recommendations(state, action), Effect::None),
        };
        if std::mem::discriminant(&next) != before {
            info!("page -> {}", next.title());
        }
        self.page = next;
        effect
    }

    fn on_welcome(&mut self, action: Action) -> Page {
        match action {
            Action::Confirm => {
                self.status = None;
                Page::PositionSelect(PositionSelect { cursor: 0 })
            }
            _ => Page::Welcome,
        }
    }

    fn on_position_select(&mut self, mut state: PositionSelect, action: Action) -> (Page, Effect) {
        let count = Position::ALL.len();
        match action {
            Action::Left => state.cursor = (state.cursor + count - 1) % count,
            Action::Right => state.cursor = (state.cursor + 1) % count,
            Action::Back => {
                self.status = None;
                return (Page::Welcome, Effect::None);
            }
            Action::Confirm => {
                let position = state.selected();
                return match self.enter_data_input(position) {
                    Ok(page) => (page, Effect::None),
                    Err(e) if e.is_missing_stats() => {
                        self.set_status(format!(
                            "No {position} stats for {} yet, collecting...",
                            self.data.season()
                        ));
                        (
                            Page::PositionSelect(state),
                            Effect::Collect {
                                position,
                                retry: Action::Confirm,
                            },
                        )
                    }
                    Err(e) => {
                        warn!("cannot open {position} data input: {e}");
                        self.set_status(e.to_string());
                        (Page::PositionSelect(state), Effect::None)
                    }
                };
            }
            _ => {}
        }
        (Page::PositionSelect(state), Effect::None)
    }

    fn on_data_input(&mut self, mut state: DataInput, action: Action) -> Page {
        let last = state.profile.len().saturating_sub(1);
        match action {
            Action::Up => state.cursor = state.cursor.saturating_sub(1),
            Action::Down => state.cursor = (state.cursor + 1).min(last),
            Action::Left => state.adjust(-1),
            Action::Right => state.adjust(1),
            Action::PageUp => state.adjust(LARGE_STEP),
            Action::PageDown => state.adjust(-LARGE_STEP),
            Action::Back => {
                self.status = None;
                return Page::PositionSelect(PositionSelect {
                    cursor: position_index(state.position()),
                });
            }
            Action::Confirm => match self.data.recommend(&state.profile) {
                Ok(recommendation) => {
                    self.status = None;
                    return Page::Result(ResultView {
                        profile: state.profile,
                        recommendation,
                    });
                }
                Err(e) => {
                    warn!("comparison failed: {e}");
                    self.set_status(e.to_string());
                }
            },
            _ => {}
        }
        Page::DataInput(state)
    }

    fn on_result(&mut self, state: ResultView, action: Action) -> Page {
        match action {
            Action::Confirm => {
                let position = state.profile.position();
                let Recommendation {
                    candidates, entries, ..
                } = state.recommendation;
                Page::Recommendations(Recommendations {
                    position,
                    candidates,
                    entries,
                    cursor: 0,
                })
            }
            Action::Back => self.reenter_data_input(state.profile.position(), Page::Result(state)),
            _ => Page::Result(state),
        }
    }

    fn on_recommendations(&mut self, mut state: Recommendations, action: Action) -> Page {
        let last = state.entries.len().saturating_sub(1);
        match action {
            Action::Left => state.cursor = state.cursor.saturating_sub(1),
            Action::Right => state.cursor = (state.cursor + 1).min(last),
            Action::Back => {
                let position = state.position;
                return self.reenter_data_input(position, Page::Recommendations(state));
            }
            Action::Home => {
                return Page::PositionSelect(PositionSelect {
                    cursor: position_index(state.position),
                });
            }
            _ => {}
        }
        Page::Recommendations(state)
    }

    /// Fresh data input page for `position`, all values at 0.
    fn enter_data_input(&mut self, position: Position) -> Result<Page, DataError> {
        let baseline = self.data.baseline(position)?;
        let profile = UserProfile::new(position, baseline.attributes().iter().cloned());
        self.status = None;
        Ok(Page::DataInput(DataInput { profile, cursor: 0 }))
    }

    /// Back to data input, staying on `current` if the baseline went away.
    fn reenter_data_input(&mut self, position: Position, current: Page) -> Page {
        match self.enter_data_input(position) {
            Ok(page) => page,
            Err(e) => {
                warn!("cannot reopen {position} data input: {e}");
                self.set_status(e.to_string());
                current
            }
        }
    }
}

fn position_index(position: Position) -> usize {
    Position::ALL.iter().position(|p| *p == position).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::season::Season;
    use coach_core::stats::{save_raw_records, stat_file_path, RawPlayerRecord};
    use coach_core::training::TrainingRepository;

    fn keeper(name: &str, punches: &str) -> RawPlayerRecord {
        RawPlayerRecord::new(name)
            .with("Passes", "600")
            .with("Passes per match", "20")
            .with("Saves", "100")
            .with("Penalties Saved", "0")
            .with("Punches", punches)
            .with("Catches", "10")
            .with("Sweeper clearances", "5")
            .with("Goal Kicks", "100")
            .with("Clean sheets", "10")
    }

    fn app_with_keepers(dir: &std::path::Path) -> App {
        let season = Season::new(2022);
        let records = vec![keeper("A", "10"), keeper("B", "30")];
        save_raw_records(&stat_file_path(dir, season, Position::Goalkeeper), &records).unwrap();

        let mut training = TrainingRepository::new();
        training
            .add(
                TrainingEntry::new("Punch bag", "Hit it", "goalkeeper", vec!["Punches".into()]),
                false,
            )
            .unwrap();
        App::new(CoachData::new(dir, season, training))
    }

    fn data_input(app: &App) -> &DataInput {
        match &app.page {
            Page::DataInput(state) => state,
            other => panic!("expected data input, got {}", other.title()),
        }
    }

    #[test]
    fn welcome_to_position_select_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        assert_eq!(app.page, Page::Welcome);
        app.handle(Action::Left);
        assert_eq!(app.page, Page::Welcome);
        app.handle(Action::Confirm);
        assert_eq!(app.page, Page::PositionSelect(PositionSelect { cursor: 0 }));
        app.handle(Action::Back);
        assert_eq!(app.page, Page::Welcome);
    }

    #[test]
    fn position_cursor_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.handle(Action::Confirm);
        app.handle(Action::Left);
        assert_eq!(app.page, Page::PositionSelect(PositionSelect { cursor: 3 }));
        app.handle(Action::Right);
        assert_eq!(app.page, Page::PositionSelect(PositionSelect { cursor: 0 }));
    }

    #[test]
    fn missing_stats_ask_for_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.handle(Action::Confirm);
        app.handle(Action::Right); // forward
        let effect = app.handle(Action::Confirm);
        assert_eq!(
            effect,
            Effect::Collect {
                position: Position::Forward,
                retry: Action::Confirm
            }
        );
        assert!(matches!(app.page, Page::PositionSelect(_)));
        assert!(app.status.as_deref().unwrap().contains("collecting"));
    }

    #[test]
    fn data_input_adjusts_within_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.handle(Action::Confirm);
        assert_eq!(app.handle(Action::Confirm), Effect::None);

        let state = data_input(&app);
        assert_eq!(state.position(), Position::Goalkeeper);
        assert_eq!(state.profile.len(), 7);

        app.handle(Action::Left);
        assert_eq!(data_input(&app).profile.values()[0].1, 0);
        for _ in 0..12 {
            app.handle(Action::PageUp);
        }
        assert_eq!(data_input(&app).profile.values()[0].1, 100);
        app.handle(Action::PageDown);
        app.handle(Action::Left);
        assert_eq!(data_input(&app).profile.values()[0].1, 89);

        app.handle(Action::Up);
        assert_eq!(data_input(&app).cursor, 0);
        for _ in 0..10 {
            app.handle(Action::Down);
        }
        assert_eq!(data_input(&app).cursor, 6);
    }

    #[test]
    fn full_flow_reaches_recommendations() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.handle(Action::Confirm);
        app.handle(Action::Confirm);
        // Everything at 100 except Punches (second attribute), left at 0.
        for cursor in 0..7 {
            if cursor != 1 {
                for _ in 0..10 {
                    app.handle(Action::PageUp);
                }
            }
            app.handle(Action::Down);
        }
        app.handle(Action::Confirm);

        let Page::Result(result) = &app.page else {
            panic!("expected result page");
        };
        assert_eq!(result.recommendation.candidates, ["Punches"]);
        assert_eq!(result.sorted_deficits()[0].attribute, "Punches");
        assert_eq!(result.sorted_deficits()[0].deficit, -50);

        app.handle(Action::Confirm);
        let Page::Recommendations(recs) = &app.page else {
            panic!("expected recommendations page");
        };
        assert_eq!(recs.selected().map(|e| e.name.as_str()), Some("Punch bag"));

        app.handle(Action::Right);
        assert!(matches!(&app.page, Page::Recommendations(r) if r.cursor == 0));

        app.handle(Action::Back);
        let state = data_input(&app);
        assert!(state.profile.values().iter().all(|(_, v)| *v == 0));
    }

    #[test]
    fn home_returns_to_position_select() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.page = Page::Recommendations(Recommendations {
            position: Position::Defender,
            candidates: vec![],
            entries: vec![],
            cursor: 0,
        });
        app.handle(Action::Home);
        assert_eq!(app.page, Page::PositionSelect(PositionSelect { cursor: 3 }));
    }

    #[test]
    fn result_back_gives_fresh_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.handle(Action::Confirm);
        app.handle(Action::Confirm);
        app.handle(Action::PageUp);
        app.handle(Action::Confirm);
        assert!(matches!(app.page, Page::Result(_)));
        app.handle(Action::Back);
        assert_eq!(data_input(&app).profile.values()[0].1, 0);
    }

    #[test]
    fn quit_from_anywhere() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_keepers(dir.path());
        app.handle(Action::Confirm);
        app.handle(Action::Quit);
        assert!(app.should_quit);
    }
}
