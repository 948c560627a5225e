// Playing positions supported by the assistant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string does not name one of the four supported positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid position `{input}`; position must be one of {}", Position::valid_list())]
pub struct ParsePositionError {
    pub input: String,
}

/// The four outfield/goal positions the stat pipeline knows how to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Display order used by the position picker and the collector.
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Forward,
        Position::Midfielder,
        Position::Defender,
    ];

    /// Lowercase identifier used in file names and CSV cells.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::Defender => "defender",
            Position::Midfielder => "midfielder",
            Position::Forward => "forward",
        }
    }

    /// Title-case label for filters on the stats site and UI headings.
    pub fn title(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }

    /// File name of the raw stat CSV for this position.
    pub fn raw_data_file_name(&self) -> String {
        format!("{}_raw_data.csv", self.as_str())
    }

    fn valid_list() -> String {
        Position::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" => Ok(Position::Goalkeeper),
            "defender" => Ok(Position::Defender),
            "midfielder" => Ok(Position::Midfielder),
            "forward" => Ok(Position::Forward),
            _ => Err(ParsePositionError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Defender".parse::<Position>().unwrap(), Position::Defender);
        assert_eq!(" FORWARD ".parse::<Position>().unwrap(), Position::Forward);
        assert_eq!("goalkeeper".parse::<Position>().unwrap(), Position::Goalkeeper);
    }

    #[test]
    fn invalid_position_lists_valid_values() {
        let err = "striker".parse::<Position>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("striker"));
        for p in Position::ALL {
            assert!(msg.contains(p.as_str()), "missing {p} in `{msg}`");
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for p in Position::ALL {
            assert_eq!(p.to_string().parse::<Position>().unwrap(), p);
        }
    }

    #[test]
    fn raw_data_file_name_uses_lowercase_id() {
        assert_eq!(Position::Midfielder.raw_data_file_name(), "midfielder_raw_data.csv");
    }
}
