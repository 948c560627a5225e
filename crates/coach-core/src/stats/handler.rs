// Loads one position's raw stat CSV and runs the processor over every row.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::baseline::NormalizedBaseline;
use super::processor::{process, ProcessedProfile};
use super::raw::{load_raw_records, read_records, RawPlayerRecord};
use super::StatsError;
use crate::position::Position;
use crate::season::Season;

/// Where the raw stat CSV for `position` in `season` lives under `data_dir`.
pub fn stat_file_path(data_dir: &Path, season: Season, position: Position) -> PathBuf {
    data_dir
        .join(season.dir_name())
        .join(position.raw_data_file_name())
}

/// Raw rows for one position, bound to that position's processor.
#[derive(Debug, Clone)]
pub struct DataHandler {
    position: Position,
    rows: Vec<RawPlayerRecord>,
}

impl DataHandler {
    /// A handler over already-collected rows.
    pub fn new(position: Position, rows: Vec<RawPlayerRecord>) -> Self {
        DataHandler { position, rows }
    }

    /// Read `path`. A missing file yields `StatsError::NotFound`; collecting
    /// the data is the caller's job.
    pub fn load(position: Position, path: &Path) -> Result<Self, StatsError> {
        let rows = load_raw_records(path)?;
        info!("loaded {} {} rows from {}", rows.len(), position, path.display());
        Ok(DataHandler::new(position, rows))
    }

    /// Load the file for `position` and `season` under `data_dir`.
    pub fn load_season(data_dir: &Path, season: Season, position: Position) -> Result<Self, StatsError> {
        DataHandler::load(position, &stat_file_path(data_dir, season, position))
    }

    pub fn from_reader<R: Read>(position: Position, rdr: R) -> Result<Self, StatsError> {
        let rows = read_records(rdr).map_err(|e| StatsError::Csv {
            path: "<reader>".to_string(),
            source: e,
        })?;
        Ok(DataHandler::new(position, rows))
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn rows(&self) -> &[RawPlayerRecord] {
        &self.rows
    }

    /// Process every row. Stops at the first row that fails.
    pub fn profiles(&self) -> Result<Vec<ProcessedProfile>, StatsError> {
        if self.rows.is_empty() {
            return Err(StatsError::Empty(self.position));
        }
        let profiles = self
            .rows
            .iter()
            .map(|row| {
                process(self.position, row).map_err(|source| StatsError::Process {
                    player: row.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("processed {} {} profiles", profiles.len(), self.position);
        Ok(profiles)
    }

    /// Attribute names of the first processed profile, in order.
    pub fn attribute_names(&self) -> Result<Vec<String>, StatsError> {
        let first = self.rows.first().ok_or(StatsError::Empty(self.position))?;
        let profile = process(self.position, first).map_err(|source| StatsError::Process {
            player: first.name.clone(),
            source,
        })?;
        Ok(profile.attribute_names().map(str::to_string).collect())
    }

    /// Min-max normalized table of every profile plus per-attribute means.
    pub fn normalized_baseline(&self) -> Result<NormalizedBaseline, StatsError> {
        let profiles = self.profiles()?;
        NormalizedBaseline::from_profiles(&profiles).ok_or(StatsError::Empty(self.position))
    }
}
