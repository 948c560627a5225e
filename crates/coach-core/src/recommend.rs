// Compare a user-entered profile with the baseline and pick training drills.

use thiserror::Error;
use tracing::debug;

use crate::position::Position;
use crate::stats::NormalizedBaseline;
use crate::training::{TrainingEntry, TrainingRepository};

/// Largest value a user can enter for an attribute.
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("attribute `{0}` is not in the baseline")]
    UnknownAttribute(String),
}

/// A player's self-assessed 0-100 scores, in attribute order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    position: Position,
    values: Vec<(String, u8)>,
}

impl UserProfile {
    /// Every attribute starts at 0.
    pub fn new<I, S>(position: Position, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        UserProfile {
            position,
            values: attributes.into_iter().map(|a| (a.into(), 0)).collect(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Set `attribute`, clamping to `MAX_SCORE`. Unknown attributes are
    /// appended.
    pub fn set(&mut self, attribute: &str, value: u32) {
        let clamped = value.min(u32::from(MAX_SCORE)) as u8;
        match self.values.iter_mut().find(|(name, _)| name == attribute) {
            Some((_, v)) => *v = clamped,
            None => self.values.push((attribute.to_string(), clamped)),
        }
    }

    pub fn get(&self, attribute: &str) -> Option<u8> {
        self.values
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, v)| *v)
    }

    pub fn values(&self) -> &[(String, u8)] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One attribute's comparison against the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deficit {
    pub attribute: String,
    pub user_value: i64,
    /// Baseline mean, truncated.
    pub baseline: i64,
    /// `user_value - baseline`; negative means below the pool.
    pub deficit: i64,
}

impl Deficit {
    pub fn is_shortfall(&self) -> bool {
        self.deficit < 0
    }
}

/// Compare every profile attribute with the baseline, in profile order.
pub fn assess(profile: &UserProfile, baseline: &NormalizedBaseline) -> Result<Vec<Deficit>, RecommendError> {
    profile
        .values()
        .iter()
        .map(|(attribute, value)| {
            let base = baseline
                .truncated_average(attribute)
                .ok_or_else(|| RecommendError::UnknownAttribute(attribute.clone()))?;
            let user_value = i64::from(*value);
            Ok(Deficit {
                attribute: attribute.clone(),
                user_value,
                baseline: base,
                deficit: user_value - base,
            })
        })
        .collect()
}

/// Attributes below the baseline, worst first. Ties keep profile order.
pub fn training_candidates(deficits: &[Deficit]) -> Vec<String> {
    let mut shortfalls: Vec<&Deficit> = deficits.iter().filter(|d| d.is_shortfall()).collect();
    shortfalls.sort_by_key(|d| d.deficit);
    shortfalls.into_iter().map(|d| d.attribute.clone()).collect()
}

/// What the recommendations page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub deficits: Vec<Deficit>,
    pub candidates: Vec<String>,
    pub entries: Vec<TrainingEntry>,
}

/// Assess `profile` and look up drills for its shortfalls at its position.
pub fn recommend(
    profile: &UserProfile,
    baseline: &NormalizedBaseline,
    repository: &TrainingRepository,
) -> Result<Recommendation, RecommendError> {
    let deficits = assess(profile, baseline)?;
    let candidates = training_candidates(&deficits);
    let entries: Vec<TrainingEntry> = repository
        .find(candidates.as_slice(), Some(profile.position().as_str()))
        .into_iter()
        .cloned()
        .collect();
    debug!(
        "{} shortfalls for {}, {} drills found",
        candidates.len(),
        profile.position(),
        entries.len()
    );
    Ok(Recommendation {
        deficits,
        candidates,
        entries,
    })
}
