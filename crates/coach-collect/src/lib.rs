// Library root: raw stat collection from the stats site and the interactive
// training-entry session behind the `add-training` binary.

pub mod collect;
pub mod premier_league;
pub mod source;
pub mod training_cli;

use coach_core::stats::StatsError;

pub use collect::{collect_season, collect_season_filtered};
pub use premier_league::PremierLeagueScraper;
pub use source::{CollectRequest, Filters, StatSource};

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The page no longer looks the way the parser expects.
    #[error("unexpected page layout: {0}")]
    Layout(String),

    #[error("failed to write collected stats: {0}")]
    Write(#[from] StatsError),
}
