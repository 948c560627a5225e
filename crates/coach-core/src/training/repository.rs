// CSV-backed store of training entries.

use std::collections::{BTreeSet, HashSet};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::entry::{TrainingEntry, TrainingRow};
use super::TrainingError;

/// Attribute names to look up: a single name or a collection of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeQuery {
    One(String),
    Many(Vec<String>),
}

impl AttributeQuery {
    /// Requested names in query order.
    pub fn into_names(self) -> Vec<String> {
        match self {
            AttributeQuery::One(name) => vec![name],
            AttributeQuery::Many(names) => names,
        }
    }
}

impl From<&str> for AttributeQuery {
    fn from(name: &str) -> Self {
        AttributeQuery::One(name.to_string())
    }
}

impl From<String> for AttributeQuery {
    fn from(name: String) -> Self {
        AttributeQuery::One(name)
    }
}

impl From<Vec<String>> for AttributeQuery {
    fn from(names: Vec<String>) -> Self {
        AttributeQuery::Many(names)
    }
}

impl From<Vec<&str>> for AttributeQuery {
    fn from(names: Vec<&str>) -> Self {
        AttributeQuery::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for AttributeQuery {
    fn from(names: &[String]) -> Self {
        AttributeQuery::Many(names.to_vec())
    }
}

impl From<&[&str]> for AttributeQuery {
    fn from(names: &[&str]) -> Self {
        AttributeQuery::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttributeQuery {
    fn from(names: [&str; N]) -> Self {
        AttributeQuery::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<BTreeSet<String>> for AttributeQuery {
    fn from(names: BTreeSet<String>) -> Self {
        AttributeQuery::Many(names.into_iter().collect())
    }
}

/// Training entries in storage order, optionally bound to a CSV file.
#[derive(Debug, Clone, Default)]
pub struct TrainingRepository {
    path: Option<PathBuf>,
    entries: Vec<TrainingEntry>,
}

impl TrainingRepository {
    /// An empty repository bound to no file. `save` fails until one is bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, creating it (and its directory) empty when absent.
    pub fn load(path: &Path) -> Result<Self, TrainingError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| TrainingError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| TrainingError::io(path, e))?;

        let entries = read_entries(file).map_err(|e| TrainingError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        info!("loaded {} training entries from {}", entries.len(), path.display());
        Ok(TrainingRepository {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Parse entries from any reader. The result is not bound to a file.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, TrainingError> {
        let entries = read_entries(rdr).map_err(|e| TrainingError::Csv {
            path: "<reader>".to_string(),
            source: e,
        })?;
        Ok(TrainingRepository {
            path: None,
            entries,
        })
    }

    /// Bind the repository to `path` for later saves.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[TrainingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the bound file with every entry.
    pub fn save(&self) -> Result<(), TrainingError> {
        let path = self.path.as_deref().ok_or(TrainingError::Unbound)?;
        if self.entries.is_empty() {
            return Err(TrainingError::NothingToSave);
        }
        let file = fs::File::create(path).map_err(|e| TrainingError::io(path, e))?;
        write_entries(file, &self.entries).map_err(|e| match e {
            WriteError::Csv(source) => TrainingError::Csv {
                path: path.display().to_string(),
                source,
            },
            WriteError::Encode(source) => TrainingError::Encode(source),
        })?;
        info!("saved {} training entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Append `entry`, saving right away when `autosave` is set.
    pub fn add(&mut self, entry: TrainingEntry, autosave: bool) -> Result<(), TrainingError> {
        debug!("adding training entry `{}`", entry.name);
        self.entries.push(entry);
        if autosave {
            self.save()?;
        }
        Ok(())
    }

    /// Entries targeting any of the queried attributes, optionally limited
    /// to one position. Matching ignores case.
    ///
    /// Results follow query order, then storage order. An entry matched by
    /// several attributes appears once, at its first match; entries sharing a
    /// name count as the same entry.
    pub fn find(
        &self,
        attributes: impl Into<AttributeQuery>,
        position: Option<&str>,
    ) -> Vec<&TrainingEntry> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut found = Vec::new();
        for attribute in attributes.into().into_names() {
            for entry in &self.entries {
                if position.is_some_and(|p| !entry.is_for(p)) {
                    continue;
                }
                if entry.targets(&attribute) && seen.insert(entry.name.as_str()) {
                    found.push(entry);
                }
            }
        }
        found
    }
}

fn read_entries<R: Read>(rdr: R) -> Result<Vec<TrainingEntry>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    reader
        .deserialize::<TrainingRow>()
        .map(|row| row.map(TrainingRow::into_entry))
        .collect()
}

enum WriteError {
    Csv(csv::Error),
    Encode(serde_json::Error),
}

fn write_entries<W: Write>(wtr: W, entries: &[TrainingEntry]) -> Result<(), WriteError> {
    let mut writer = csv::Writer::from_writer(wtr);
    for entry in entries {
        let row = TrainingRow::from_entry(entry).map_err(WriteError::Encode)?;
        writer.serialize(row).map_err(WriteError::Csv)?;
    }
    writer.flush().map_err(|e| WriteError::Csv(e.into()))?;
    Ok(())
}
