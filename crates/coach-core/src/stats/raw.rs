// Raw scraped player records and their CSV form.
//
// A raw stat CSV has a `name` column followed by one column per scraped stat,
// holding the display strings exactly as the stats site showed them
// ("76%", "1,234", ...).

use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use super::StatsError;

/// Column holding the player name in raw stat CSVs.
pub const NAME_COLUMN: &str = "name";

/// One scraped player: name plus raw stat display strings, in scrape order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPlayerRecord {
    pub name: String,
    fields: Vec<(String, String)>,
}

impl RawPlayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        RawPlayerRecord {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, stat: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(stat, value);
        self
    }

    /// Set `stat`. A stat seen before keeps its original position.
    pub fn insert(&mut self, stat: impl Into<String>, value: impl Into<String>) {
        let stat = stat.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == stat) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((stat, value)),
        }
    }

    pub fn get(&self, stat: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == stat)
            .map(|(_, v)| v.as_str())
    }

    /// All raw stats in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Keep only ASCII digits and `.`, then parse as f64.
///
/// Returns `None` when nothing numeric is left or the remainder does not
/// parse (e.g. "1.2.3").
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if kept.is_empty() {
        return None;
    }
    kept.parse().ok()
}

// ---------------------------------------------------------------------------
// CSV I/O
// ---------------------------------------------------------------------------

pub(crate) fn read_records<R: Read>(rdr: R) -> Result<Vec<RawPlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut record = RawPlayerRecord::new("");
        for (column, value) in headers.iter().zip(row.iter()) {
            if column == NAME_COLUMN {
                record.name = value.trim().to_string();
            } else {
                record.insert(column, value);
            }
        }
        records.push(record);
    }
    Ok(records)
}

/// Load raw records from a CSV file.
pub fn load_raw_records(path: &Path) -> Result<Vec<RawPlayerRecord>, StatsError> {
    let file = std::fs::File::open(path).map_err(|e| StatsError::from_open(path, e))?;
    read_records(file).map_err(|e| StatsError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

pub(crate) fn write_records<W: Write>(
    wtr: W,
    records: &[RawPlayerRecord],
) -> Result<(), csv::Error> {
    // Header: name, then every stat column in first-seen order.
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for (stat, _) in record.fields() {
            if !columns.contains(&stat) {
                columns.push(stat);
            }
        }
    }

    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(std::iter::once(NAME_COLUMN).chain(columns.iter().copied()))?;
    for record in records {
        let row = std::iter::once(record.name.as_str())
            .chain(columns.iter().map(|c| record.get(c).unwrap_or("")));
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write raw records to `path`, creating the parent directory if needed.
/// The file is rewritten wholesale.
pub fn save_raw_records(path: &Path, records: &[RawPlayerRecord]) -> Result<(), StatsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StatsError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|e| StatsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_records(file, records).map_err(|e| StatsError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("wrote {} raw records to {}", records.len(), path.display());
    Ok(())
}
