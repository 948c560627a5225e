// Min-max normalization of processed profiles into a 0-100 comparison baseline.

use super::processor::ProcessedProfile;

/// Spread below which a column is treated as constant.
const RANGE_EPSILON: f64 = 1e-9;

/// Score given to every player in a column with no spread. There is no
/// ordering to express, so everyone sits at the midpoint.
pub const CONSTANT_COLUMN_SCORE: f64 = 50.0;

/// Per-attribute 0-100 table for a pool of players of one position, plus the
/// per-attribute mean of that table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBaseline {
    attributes: Vec<String>,
    players: Vec<String>,
    /// `rows[player][attribute]`
    rows: Vec<Vec<f64>>,
    averages: Vec<f64>,
}

/// Rescale `values` to 0-100 via `(x - min) / (max - min) * 100`.
///
/// A column whose max and min coincide maps every value to
/// `CONSTANT_COLUMN_SCORE`.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.is_nan() || range < RANGE_EPSILON {
        return vec![CONSTANT_COLUMN_SCORE; values.len()];
    }
    values.iter().map(|v| (v - min) / range * 100.0).collect()
}

impl NormalizedBaseline {
    /// Build the baseline from processed profiles sharing one attribute layout.
    ///
    /// Attributes are taken from the first profile; a profile lacking one of
    /// them counts as 0. Returns `None` for an empty pool.
    pub fn from_profiles(profiles: &[ProcessedProfile]) -> Option<Self> {
        let first = profiles.first()?;
        let attributes: Vec<String> = first.attribute_names().map(str::to_string).collect();

        let columns: Vec<Vec<f64>> = attributes
            .iter()
            .map(|attr| {
                let column: Vec<f64> = profiles.iter().map(|p| p.get(attr).unwrap_or(0.0)).collect();
                min_max_scale(&column)
            })
            .collect();

        let rows: Vec<Vec<f64>> = (0..profiles.len())
            .map(|i| columns.iter().map(|col| col[i]).collect())
            .collect();
        let n = profiles.len() as f64;
        let averages = columns.iter().map(|col| col.iter().sum::<f64>() / n).collect();

        Some(NormalizedBaseline {
            attributes,
            players: profiles.iter().map(|p| p.name.clone()).collect(),
            rows,
            averages,
        })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Normalized values for the player at `index`, in attribute order.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Mean normalized value of `attribute` across the pool.
    pub fn average(&self, attribute: &str) -> Option<f64> {
        self.attributes
            .iter()
            .position(|a| a == attribute)
            .map(|i| self.averages[i])
    }

    /// `(attribute, mean)` pairs in attribute order.
    pub fn averages(&self) -> impl Iterator<Item = (&str, f64)> {
        self.attributes
            .iter()
            .map(String::as_str)
            .zip(self.averages.iter().copied())
    }

    /// Mean truncated toward zero, the form user input is compared against.
    pub fn truncated_average(&self, attribute: &str) -> Option<i64> {
        self.average(attribute).map(|v| v.trunc() as i64)
    }
}
