// A single training drill and the flat on-disk encoding of its fields.

use serde::{Deserialize, Serialize};

/// Single-line stand-in for a newline inside a stored description.
pub const NEWLINE_PLACEHOLDER: &str = "|n|";

/// Characters stripped from the legacy delimited attribute form.
const LEGACY_WRAPPERS: &[char] = &['[', ']', '"', '\''];

/// A named drill tagged with the attributes it improves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingEntry {
    pub name: String,
    /// Multi-line description, decoded.
    pub description: String,
    position: String,
    pub attributes: Vec<String>,
}

impl TrainingEntry {
    /// The position is stored lowercase.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        position: &str,
        attributes: Vec<String>,
    ) -> Self {
        TrainingEntry {
            name: name.into(),
            description: description.into(),
            position: position.trim().to_lowercase(),
            attributes,
        }
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    /// Whether any attribute equals `attribute`, ignoring case.
    pub fn targets(&self, attribute: &str) -> bool {
        let wanted = attribute.to_lowercase();
        self.attributes.iter().any(|a| a.to_lowercase() == wanted)
    }

    /// Whether the entry is for `position`, ignoring case.
    pub fn is_for(&self, position: &str) -> bool {
        self.position == position.trim().to_lowercase()
    }
}

/// Replace real newlines and literal `\n` sequences with the placeholder.
pub fn encode_description(description: &str) -> String {
    description
        .replace("\\n", NEWLINE_PLACEHOLDER)
        .replace('\n', NEWLINE_PLACEHOLDER)
}

pub fn decode_description(stored: &str) -> String {
    stored.replace(NEWLINE_PLACEHOLDER, "\n")
}

/// Decode a stored attribute list.
///
/// Accepts a JSON array of strings (`["Duels", "Interceptions"]`) or the
/// legacy hand-typed form (`Duels, Interceptions`, optionally wrapped in
/// brackets or quotes). Items are trimmed and empty items dropped.
pub fn parse_attribute_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return clean(items.iter().map(String::as_str));
        }
    }
    let stripped: String = trimmed.chars().filter(|c| !LEGACY_WRAPPERS.contains(c)).collect();
    clean(stripped.split(','))
}

fn clean<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One CSV row of the training file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TrainingRow {
    pub name: String,
    pub description: String,
    pub position: String,
    pub attributes: String,
}

impl TrainingRow {
    pub fn into_entry(self) -> TrainingEntry {
        TrainingEntry::new(
            self.name,
            decode_description(&self.description),
            &self.position,
            parse_attribute_list(&self.attributes),
        )
    }

    pub fn from_entry(entry: &TrainingEntry) -> Result<Self, serde_json::Error> {
        Ok(TrainingRow {
            name: entry.name.clone(),
            description: encode_description(&entry.description),
            position: entry.position.clone(),
            attributes: serde_json::to_string(&entry.attributes)?,
        })
    }
}
