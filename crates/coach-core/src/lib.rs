// Library root: football stat processing, baselines, training drills and
// recommendations shared by the collector and the terminal UI.

pub mod config;
pub mod position;
pub mod recommend;
pub mod season;
pub mod stats;
pub mod training;

pub use position::Position;
pub use season::Season;
