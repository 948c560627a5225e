// Stat pipeline: raw scraped records -> processed profiles -> normalized baseline.

pub mod baseline;
pub mod handler;
pub mod processor;
pub mod raw;

use std::path::Path;

use crate::position::Position;

pub use baseline::NormalizedBaseline;
pub use handler::{stat_file_path, DataHandler};
pub use processor::{process, ProcessError, ProcessedProfile};
pub use raw::{load_raw_records, save_raw_records, RawPlayerRecord};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("stat file not found: {path}")]
    NotFound { path: String },

    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("no {0} rows to process")]
    Empty(Position),

    #[error("failed to process player `{player}`: {source}")]
    Process {
        player: String,
        source: ProcessError,
    },
}

impl StatsError {
    pub(crate) fn from_open(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StatsError::NotFound {
                path: path.display().to_string(),
            }
        } else {
            StatsError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    }

    /// Whether the stat file has simply not been collected yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StatsError::NotFound { .. })
    }
}
