// Football season identifiers ("2022/23") and their on-disk form ("2022-23").

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid season `{input}`; expected a form like 2022/23 or 2022-23")]
pub struct ParseSeasonError {
    pub input: String,
}

/// A season, identified by the calendar year it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Season { start_year }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// The season in progress on `date`. January through June still belong
    /// to the season that started the previous summer.
    pub fn containing(date: NaiveDate) -> Self {
        let year = if date.month() <= 6 {
            date.year() - 1
        } else {
            date.year()
        };
        Season::new(year)
    }

    /// The season in progress today (local time).
    pub fn current() -> Self {
        Season::containing(Local::now().date_naive())
    }

    /// The season `n` seasons before this one.
    pub fn past(&self, n: u32) -> Self {
        Season::new(self.start_year - n as i32)
    }

    /// Directory form used under the data root, e.g. `2022-23`.
    pub fn dir_name(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }

    /// Label used by the stats site filters, e.g. `2022/23`.
    pub fn label(&self) -> String {
        format!("{}/{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeasonError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let (start, end) = trimmed
            .split_once(['/', '-'])
            .ok_or_else(err)?;
        let start_year: i32 = start.trim().parse().map_err(|_| err())?;
        let end: i32 = end.trim().parse().map_err(|_| err())?;
        let expected = start_year + 1;
        let matches = match end {
            e if e >= 100 => e == expected,
            e => e == expected.rem_euclid(100),
        };
        if !matches {
            return Err(err());
        }
        Ok(Season::new(start_year))
    }
}

impl<'de> Deserialize<'de> for Season {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_half_of_year_belongs_to_previous_season() {
        assert_eq!(Season::containing(date(2023, 3, 1)), Season::new(2022));
        assert_eq!(Season::containing(date(2023, 6, 30)), Season::new(2022));
    }

    #[test]
    fn second_half_of_year_starts_new_season() {
        assert_eq!(Season::containing(date(2023, 7, 1)), Season::new(2023));
        assert_eq!(Season::containing(date(2023, 12, 31)), Season::new(2023));
    }

    #[test]
    fn past_steps_back() {
        assert_eq!(Season::new(2023).past(1), Season::new(2022));
        assert_eq!(Season::new(2023).past(0), Season::new(2023));
    }

    #[test]
    fn label_and_dir_name() {
        let s = Season::new(2022);
        assert_eq!(s.label(), "2022/23");
        assert_eq!(s.dir_name(), "2022-23");
        assert_eq!(Season::new(1999).label(), "1999/00");
    }

    #[test]
    fn parses_both_forms() {
        assert_eq!("2022/23".parse::<Season>().unwrap(), Season::new(2022));
        assert_eq!("2022-23".parse::<Season>().unwrap(), Season::new(2022));
        assert_eq!("2022/2023".parse::<Season>().unwrap(), Season::new(2022));
        assert_eq!("1999/00".parse::<Season>().unwrap(), Season::new(1999));
    }

    #[test]
    fn rejects_malformed_seasons() {
        assert!("2022".parse::<Season>().is_err());
        assert!("2022/25".parse::<Season>().is_err());
        assert!("data_new".parse::<Season>().is_err());
    }
}
