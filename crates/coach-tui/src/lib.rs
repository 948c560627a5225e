// Terminal wizard: pick a position, rate yourself, compare with the best
// players of the season and browse matching training drills.

pub mod app;
pub mod data;
pub mod tui;
