// Configuration loading and parsing (coach.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::season::Season;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// coach.toml structs
// ---------------------------------------------------------------------------

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE_NAME: &str = "coach.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Root directory holding `<season>/<position>_raw_data.csv` files.
    pub dir: PathBuf,
    /// Season whose stats form the comparison baseline. When omitted the
    /// season in progress today is used.
    #[serde(default)]
    pub season: Option<Season>,
    /// Training repository CSV used for recommendations.
    pub training_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    pub base_url: String,
    pub players_per_position: usize,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Config {
    /// Baseline season: the configured one, or the one in progress today.
    pub fn season(&self) -> Season {
        self.data.season.unwrap_or_else(Season::current)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/coach.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` for application use.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Copy `defaults/coach.toml` to `config/coach.toml` unless the latter
/// already exists. Returns the written path when a copy was made.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE_NAME);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/{CONFIG_FILE_NAME} nor defaults/{CONFIG_FILE_NAME} found in {}",
                base_dir.display()
            ),
        });
    }

    let copy_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(copy_error)?;
    }
    std::fs::copy(&source, &target).map_err(copy_error)?;
    Ok(Some(target))
}

/// Loads config relative to the current working directory, copying defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validation(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.dir.as_os_str().is_empty() {
        return Err(validation("data.dir", "must not be empty"));
    }

    let training = &config.data.training_file;
    if training.extension().and_then(|e| e.to_str()) != Some("csv") {
        return Err(validation(
            "data.training_file",
            format!("must be a .csv file, got {}", training.display()),
        ));
    }

    let collector = &config.collector;
    if !(collector.base_url.starts_with("http://") || collector.base_url.starts_with("https://")) {
        return Err(validation(
            "collector.base_url",
            format!("must be an http(s) URL, got {}", collector.base_url),
        ));
    }
    if collector.players_per_position == 0 {
        return Err(validation("collector.players_per_position", "must be > 0"));
    }
    if collector.timeout_secs == 0 {
        return Err(validation("collector.timeout_secs", "must be > 0"));
    }
    if collector.user_agent.trim().is_empty() {
        return Err(validation("collector.user_agent", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// The workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    fn defaults_text() -> String {
        fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE_NAME))
            .expect("defaults/coach.toml should exist")
    }

    /// Write `text` as config/coach.toml under a fresh temp dir.
    fn config_dir_with(text: &str) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        fs::write(tmp.path().join("config").join(CONFIG_FILE_NAME), text).unwrap();
        tmp
    }

    #[test]
    fn load_default_config() {
        let tmp = config_dir_with(&defaults_text());
        let config = load_config_from(tmp.path()).expect("defaults should be valid");

        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.data.season, Some(Season::new(2022)));
        assert_eq!(
            config.data.training_file,
            PathBuf::from("data/training/training_01.csv")
        );
        assert_eq!(config.collector.base_url, "https://www.premierleague.com");
        assert_eq!(config.collector.players_per_position, 10);
        assert_eq!(config.collector.request_delay_ms, 2000);
        assert_eq!(config.collector.timeout_secs, 30);
        assert_eq!(config.season(), Season::new(2022));
    }

    #[test]
    fn missing_season_falls_back_to_current() {
        let text = defaults_text().replace("season = \"2022/23\"\n", "");
        let tmp = config_dir_with(&text);
        let config = load_config_from(tmp.path()).unwrap();
        assert!(config.data.season.is_none());
        assert_eq!(config.season(), Season::current());
    }

    #[test]
    fn invalid_season_is_parse_error() {
        let text = defaults_text().replace("2022/23", "last-year");
        let tmp = config_dir_with(&text);
        let err = load_config_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "got {err:?}");
    }

    #[test]
    fn rejects_zero_players_per_position() {
        let text = defaults_text().replace("players_per_position = 10", "players_per_position = 0");
        let tmp = config_dir_with(&text);
        match load_config_from(tmp.path()).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "collector.players_per_position")
            }
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_http_base_url() {
        let text = defaults_text().replace("https://www.premierleague.com", "ftp://example.com");
        let tmp = config_dir_with(&text);
        match load_config_from(tmp.path()).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "collector.base_url"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_csv_training_file() {
        let text = defaults_text().replace("training_01.csv", "training_01.json");
        let tmp = config_dir_with(&text);
        match load_config_from(tmp.path()).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "data.training_file"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_config_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = config_dir_with("this is [not valid toml");
        let err = load_config_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn ensure_config_file_copies_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("defaults")).unwrap();
        fs::write(tmp.path().join("defaults").join(CONFIG_FILE_NAME), defaults_text()).unwrap();

        let copied = ensure_config_file(tmp.path()).unwrap();
        assert_eq!(copied, Some(tmp.path().join("config").join(CONFIG_FILE_NAME)));
        load_config_from(tmp.path()).expect("copied defaults should load");
    }

    #[test]
    fn ensure_config_file_keeps_existing() {
        let tmp = config_dir_with("# user edited");
        fs::create_dir_all(tmp.path().join("defaults")).unwrap();
        fs::write(tmp.path().join("defaults").join(CONFIG_FILE_NAME), defaults_text()).unwrap();

        assert_eq!(ensure_config_file(tmp.path()).unwrap(), None);
        let kept = fs::read_to_string(tmp.path().join("config").join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(kept, "# user edited");
    }

    #[test]
    fn ensure_config_file_without_defaults_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ensure_config_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
    }

    #[test]
    fn existing_config_needs_no_defaults() {
        let tmp = config_dir_with(&defaults_text());
        assert_eq!(ensure_config_file(tmp.path()).unwrap(), None);
    }
}
