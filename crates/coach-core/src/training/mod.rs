// Training drills and the repository that stores and queries them.

pub mod entry;
pub mod repository;

use std::path::Path;

pub use entry::{decode_description, encode_description, parse_attribute_list, TrainingEntry};
pub use repository::{AttributeQuery, TrainingRepository};

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("failed to access training file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in training file {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("failed to encode attribute list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("training repository is not bound to a file; load one first")]
    Unbound,

    #[error("no training entries to save")]
    NothingToSave,
}

impl TrainingError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        TrainingError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
