// Collection runs: ask a source for each position and write the raw CSVs.

use std::path::{Path, PathBuf};

use tracing::info;

use coach_core::position::Position;
use coach_core::season::Season;
use coach_core::stats::{save_raw_records, stat_file_path};

use crate::source::{CollectRequest, Filters, StatSource};
use crate::CollectError;

/// Collect `positions` (all four when empty) for `season` and write each to
/// `<data_dir>/<season-dir>/<position>_raw_data.csv`. Returns the written
/// paths. The first failure ends the run.
pub async fn collect_season(
    source: &dyn StatSource,
    data_dir: &Path,
    season: Season,
    positions: &[Position],
    limit: usize,
) -> Result<Vec<PathBuf>, CollectError> {
    collect_season_filtered(source, data_dir, season, positions, limit, &Filters::default()).await
}

/// `collect_season` with club and nationality filters.
pub async fn collect_season_filtered(
    source: &dyn StatSource,
    data_dir: &Path,
    season: Season,
    positions: &[Position],
    limit: usize,
    filters: &Filters,
) -> Result<Vec<PathBuf>, CollectError> {
    let positions: &[Position] = if positions.is_empty() {
        &Position::ALL
    } else {
        positions
    };

    let mut written = Vec::with_capacity(positions.len());
    for &position in positions {
        info!("collecting {position} stats for {season}");
        let request = CollectRequest {
            season,
            position,
            filters: filters.clone(),
            limit,
        };
        let records = source.collect(&request).await?;
        let path = stat_file_path(data_dir, season, position);
        save_raw_records(&path, &records)?;
        info!("wrote {} {position} records to {}", records.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use coach_core::stats::{load_raw_records, RawPlayerRecord};

    use super::*;

    /// Returns one fixed player per request and remembers what it was asked.
    #[derive(Default)]
    struct FakeSource {
        requests: Mutex<Vec<CollectRequest>>,
        fail_on: Option<Position>,
    }

    #[async_trait]
    impl StatSource for FakeSource {
        async fn collect(&self, request: &CollectRequest) -> Result<Vec<RawPlayerRecord>, CollectError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail_on == Some(request.position) {
                return Err(CollectError::Layout("no players found".into()));
            }
            Ok(vec![RawPlayerRecord::new(format!("Top {}", request.position))
                .with("Passes", "1,000")
                .with("Passes per match", "50")])
        }
    }

    #[tokio::test]
    async fn writes_one_file_per_position() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let season = Season::new(2022);

        let written = collect_season(&source, dir.path(), season, &[Position::Defender], 5)
            .await
            .unwrap();
        assert_eq!(written, vec![dir.path().join("2022-23").join("defender_raw_data.csv")]);

        let records = load_raw_records(&written[0]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Top defender");
        assert_eq!(records[0].get("Passes"), Some("1,000"));

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests[0].limit, 5);
        assert_eq!(requests[0].season, season);
    }

    #[tokio::test]
    async fn no_positions_means_all() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let written = collect_season(&source, dir.path(), Season::new(2021), &[], 1)
            .await
            .unwrap();
        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.exists()));
    }

    #[tokio::test]
    async fn filters_reach_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::default();
        let filters = Filters {
            club: Some("Liverpool".into()),
            nationality: None,
        };
        collect_season_filtered(&source, dir.path(), Season::new(2022), &[Position::Forward], 3, &filters)
            .await
            .unwrap();
        assert_eq!(source.requests.lock().unwrap()[0].filters, filters);
    }

    #[tokio::test]
    async fn failure_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            fail_on: Some(Position::Forward),
            ..Default::default()
        };
        let err = collect_season(
            &source,
            dir.path(),
            Season::new(2022),
            &[Position::Forward, Position::Defender],
            1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CollectError::Layout(_)));
        assert_eq!(source.requests.lock().unwrap().len(), 1);
        assert!(!dir.path().join("2022-23").join("defender_raw_data.csv").exists());
    }
}
