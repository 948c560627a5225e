// Data the pages draw on: per-position baselines and the training repository.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use coach_core::position::Position;
use coach_core::recommend::{recommend, Recommendation, RecommendError, UserProfile};
use coach_core::season::Season;
use coach_core::stats::{DataHandler, NormalizedBaseline, StatsError};
use coach_core::training::TrainingRepository;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl DataError {
    /// The stat file for the position has not been collected yet.
    pub fn is_missing_stats(&self) -> bool {
        matches!(self, DataError::Stats(e) if e.is_not_found())
    }
}

/// Stat files for one season plus the training repository. Baselines are
/// computed on first use and cached.
pub struct CoachData {
    data_dir: PathBuf,
    season: Season,
    training: TrainingRepository,
    baselines: HashMap<Position, NormalizedBaseline>,
}

impl CoachData {
    pub fn new(data_dir: impl Into<PathBuf>, season: Season, training: TrainingRepository) -> Self {
        CoachData {
            data_dir: data_dir.into(),
            season,
            training,
            baselines: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn training(&self) -> &TrainingRepository {
        &self.training
    }

    /// Baseline for `position`, loading the season's stat file if needed.
    pub fn baseline(&mut self, position: Position) -> Result<&NormalizedBaseline, DataError> {
        if !self.baselines.contains_key(&position) {
            let handler = DataHandler::load_season(&self.data_dir, self.season, position)?;
            let baseline = handler.normalized_baseline()?;
            info!(
                "{position} baseline for {} built from {} players",
                self.season,
                baseline.players().len()
            );
            self.baselines.insert(position, baseline);
        }
        self.baselines
            .get(&position)
            .ok_or_else(|| DataError::Stats(StatsError::Empty(position)))
    }

    /// Forget a cached baseline so the next use reloads it from disk.
    pub fn invalidate(&mut self, position: Position) {
        self.baselines.remove(&position);
    }

    /// Re-read the training file so drills added since startup are found.
    /// A failed read keeps the entries already loaded.
    pub fn reload_training(&mut self) {
        let Some(path) = self.training.path().map(Path::to_path_buf) else {
            return;
        };
        match TrainingRepository::load(&path) {
            Ok(training) => {
                if training.len() != self.training.len() {
                    info!("training file {} now has {} entries", path.display(), training.len());
                }
                self.training = training;
            }
            Err(e) => warn!("keeping loaded training entries, reload failed: {e}"),
        }
    }

    /// Compare `profile` with its position's baseline and find drills in the
    /// freshly reloaded training file.
    pub fn recommend(&mut self, profile: &UserProfile) -> Result<Recommendation, DataError> {
        let position = profile.position();
        self.baseline(position)?;
        self.reload_training();
        let baseline = self
            .baselines
            .get(&position)
            .ok_or(DataError::Stats(StatsError::Empty(position)))?;
        Ok(recommend(profile, baseline, &self.training)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_core::stats::{save_raw_records, stat_file_path, RawPlayerRecord};
    use coach_core::training::TrainingEntry;

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

    fn punch_drill(name: &str) -> TrainingEntry {
        TrainingEntry::new(name, "Hit it", "goalkeeper", vec!["Punches".into()])
    }

    #[test]
    fn recommend_sees_drills_added_after_startup() {
        let dir = tempfile::tempdir().unwrap();
        let season = Season::new(2022);
        let records = vec![keeper("A", "10"), keeper("B", "30")];
        save_raw_records(&stat_file_path(dir.path(), season, Position::Goalkeeper), &records).unwrap();

        let training_path = dir.path().join("training").join("drills.csv");
        let mut writer = TrainingRepository::load(&training_path).unwrap();
        writer.add(punch_drill("Punch bag"), true).unwrap();

        let mut data = CoachData::new(
            dir.path(),
            season,
            TrainingRepository::load(&training_path).unwrap(),
        );
        let profile = UserProfile::new(Position::Goalkeeper, ["Punches"]);
        assert_eq!(data.recommend(&profile).unwrap().entries.len(), 1);

        // Another process appends a drill while the wizard is open.
        writer.add(punch_drill("High balls"), true).unwrap();
        let names: Vec<String> = data
            .recommend(&profile)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["Punch bag", "High balls"]);
        assert_eq!(data.training().len(), 2);
    }

    #[test]
    fn unbound_training_is_left_alone() {
        let mut training = TrainingRepository::new();
        training.add(punch_drill("Punch bag"), false).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut data = CoachData::new(dir.path(), Season::new(2022), training);
        data.reload_training();
        assert_eq!(data.training().len(), 1);
    }
}
