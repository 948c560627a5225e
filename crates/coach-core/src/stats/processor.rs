// Per-position derivation of processed profiles from raw scraped stats.
//
// Every position owns a static rule table. `process` coerces the raw record
// to numbers, derives the appearance count, then evaluates the table in order.

use std::collections::HashMap;

use thiserror::Error;

use super::raw::{coerce_numeric, RawPlayerRecord};
use crate::position::Position;

/// Raw stat used with `PASSES_PER_MATCH` to derive the appearance count.
pub const PASSES: &str = "Passes";
pub const PASSES_PER_MATCH: &str = "Passes per match";
/// Derived raw value available to rules as a denominator.
pub const APPEARANCE: &str = "Appearance";

const DECIMAL_PLACES: i32 = 2;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    #[error("missing raw stat `{0}`")]
    MissingField(String),

    #[error("raw stat `{field}` has non-numeric value `{value}`")]
    NotNumeric { field: String, value: String },

    #[error("cannot derive `{attribute}`: `{denominator}` is zero")]
    ZeroDenominator {
        attribute: String,
        denominator: String,
    },
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// How one processed attribute is derived from the numeric raw stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// The raw stat unchanged, under its own name.
    Passthrough(&'static str),
    /// `value / total * 100`, rounded to 2 places, under the value's name.
    Percentage {
        value: &'static str,
        total: &'static str,
    },
    /// `won / (won + lost) * 100`, rounded to 2 places.
    WonRatio {
        attribute: &'static str,
        won: &'static str,
        lost: &'static str,
    },
    /// `value / Appearance`.
    PerMatch {
        attribute: &'static str,
        value: &'static str,
    },
}

impl Derivation {
    /// Name of the attribute this rule produces.
    pub fn attribute(&self) -> &'static str {
        match *self {
            Derivation::Passthrough(name) => name,
            Derivation::Percentage { value, .. } => value,
            Derivation::WonRatio { attribute, .. } => attribute,
            Derivation::PerMatch { attribute, .. } => attribute,
        }
    }

    /// Raw stats this rule reads.
    fn inputs(&self) -> Vec<&'static str> {
        match *self {
            Derivation::Passthrough(name) => vec![name],
            Derivation::Percentage { value, total } => vec![value, total],
            Derivation::WonRatio { won, lost, .. } => vec![won, lost],
            Derivation::PerMatch { value, .. } => vec![value, APPEARANCE],
        }
    }
}

use Derivation::{Passthrough, Percentage, PerMatch, WonRatio};

const GOALKEEPER_RULES: &[Derivation] = &[
    Percentage { value: "Penalties Saved", total: "Saves" },
    Percentage { value: "Punches", total: "Saves" },
    Percentage { value: "Catches", total: "Saves" },
    Percentage { value: "Sweeper clearances", total: "Saves" },
    Passthrough("Goal Kicks"),
    Passthrough("Clean sheets"),
    Passthrough(PASSES_PER_MATCH),
];

const DEFENDER_RULES: &[Derivation] = &[
    Passthrough("Tackle success %"),
    Percentage { value: "Headed Clearance", total: "Clearances" },
    Percentage { value: "Clearances", total: APPEARANCE },
    WonRatio { attribute: "Duels", won: "Duels won", lost: "Duels lost" },
    WonRatio { attribute: "Aerial battles", won: "Aerial battles won", lost: "Aerial battles lost" },
    Passthrough("Cross accuracy %"),
    Passthrough(PASSES_PER_MATCH),
    Passthrough("Interceptions"),
];

const MIDFIELDER_RULES: &[Derivation] = &[
    Percentage { value: "Headed goals", total: "Goals" },
    Passthrough("Shooting accuracy %"),
    Passthrough("Cross accuracy %"),
    Passthrough("Tackle success %"),
    WonRatio { attribute: "Duels", won: "Duels won", lost: "Duels lost" },
    WonRatio { attribute: "Aerial battles", won: "Aerial battles won", lost: "Aerial battles lost" },
    Passthrough(PASSES_PER_MATCH),
    Passthrough("Big Chances Created"),
];

// "Cross accuracy %" holds crosses per match for forwards, not the site's
// accuracy figure. Kept as-is until the intended metric is confirmed.
const FORWARD_RULES: &[Derivation] = &[
    Percentage { value: "Headed goals", total: "Goals" },
    Passthrough("Goals"),
    Passthrough("Shots on target"),
    Passthrough("Shooting accuracy %"),
    Passthrough(PASSES_PER_MATCH),
    Passthrough("Big Chances Created"),
    Passthrough("Big chances missed"),
    Passthrough("Freekicks scored"),
    Passthrough("Assists"),
    PerMatch { attribute: "Cross accuracy %", value: "Crosses" },
];

/// The rule table for a position.
pub fn rules(position: Position) -> &'static [Derivation] {
    match position {
        Position::Goalkeeper => GOALKEEPER_RULES,
        Position::Defender => DEFENDER_RULES,
        Position::Midfielder => MIDFIELDER_RULES,
        Position::Forward => FORWARD_RULES,
    }
}

/// Ordered processed attribute names for a position.
pub fn attribute_names(position: Position) -> Vec<&'static str> {
    rules(position).iter().map(Derivation::attribute).collect()
}

/// Raw stats a record must carry to be processed for `position`, in first-use
/// order. The collector scrapes exactly these.
pub fn required_fields(position: Position) -> Vec<&'static str> {
    let mut fields = vec![PASSES, PASSES_PER_MATCH];
    for rule in rules(position) {
        for input in rule.inputs() {
            if input != APPEARANCE && !fields.contains(&input) {
                fields.push(input);
            }
        }
    }
    fields
}

// ---------------------------------------------------------------------------
// Processed profile
// ---------------------------------------------------------------------------

/// Derived numeric attributes for one player, in rule order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedProfile {
    pub name: String,
    values: Vec<(String, f64)>,
}

impl ProcessedProfile {
    pub fn get(&self, attribute: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, v)| *v)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> &[(String, f64)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Numeric view of a raw record plus the derived appearance count.
struct NumericStats(HashMap<String, f64>);

impl NumericStats {
    fn from_raw(raw: &RawPlayerRecord) -> Result<Self, ProcessError> {
        let mut values = HashMap::with_capacity(raw.len() + 1);
        for (field, value) in raw.fields() {
            let number = coerce_numeric(value).ok_or_else(|| ProcessError::NotNumeric {
                field: field.to_string(),
                value: value.to_string(),
            })?;
            values.insert(field.to_string(), number);
        }
        let mut stats = NumericStats(values);

        let passes = stats.get(PASSES)?;
        let per_match = stats.get(PASSES_PER_MATCH)?;
        if per_match == 0.0 {
            return Err(ProcessError::ZeroDenominator {
                attribute: APPEARANCE.to_string(),
                denominator: PASSES_PER_MATCH.to_string(),
            });
        }
        stats.0.insert(APPEARANCE.to_string(), (passes / per_match).ceil());
        Ok(stats)
    }

    fn get(&self, field: &str) -> Result<f64, ProcessError> {
        self.0
            .get(field)
            .copied()
            .ok_or_else(|| ProcessError::MissingField(field.to_string()))
    }

    fn ratio(
        &self,
        attribute: &str,
        value: f64,
        denominator: f64,
        denominator_name: &str,
    ) -> Result<f64, ProcessError> {
        if denominator == 0.0 {
            return Err(ProcessError::ZeroDenominator {
                attribute: attribute.to_string(),
                denominator: denominator_name.to_string(),
            });
        }
        Ok(value / denominator)
    }

    fn derive(&self, rule: &Derivation) -> Result<f64, ProcessError> {
        let attribute = rule.attribute();
        match *rule {
            Passthrough(name) => self.get(name),
            Percentage { value, total } => {
                let r = self.ratio(attribute, self.get(value)?, self.get(total)?, total)?;
                Ok(round_to(r * 100.0, DECIMAL_PLACES))
            }
            WonRatio { won, lost, .. } => {
                let won_v = self.get(won)?;
                let total = won_v + self.get(lost)?;
                let denominator = format!("{won} + {lost}");
                let r = self.ratio(attribute, won_v, total, &denominator)?;
                Ok(round_to(r * 100.0, DECIMAL_PLACES))
            }
            PerMatch { value, .. } => {
                self.ratio(attribute, self.get(value)?, self.get(APPEARANCE)?, APPEARANCE)
            }
        }
    }
}

/// Round to `places` decimals, ties to even.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Derive the processed profile of `raw` for `position`.
///
/// Every raw stat (the name excluded) must be numeric after stripping symbols.
pub fn process(position: Position, raw: &RawPlayerRecord) -> Result<ProcessedProfile, ProcessError> {
    let stats = NumericStats::from_raw(raw)?;
    let values = rules(position)
        .iter()
        .map(|rule| Ok((rule.attribute().to_string(), stats.derive(rule)?)))
        .collect::<Result<Vec<_>, ProcessError>>()?;
    Ok(ProcessedProfile {
        name: raw.name.clone(),
        values,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
