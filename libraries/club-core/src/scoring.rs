//! Member score aggregation
//!
//! Every album keeps at most one score per member. Writing a score replaces
//! the member's previous value, and the album's `average_user_score` is the
//! arithmetic mean of the current scores rounded to one decimal place (0 when
//! nobody has scored the album yet).

use crate::error::{ClubError, Result};
use crate::types::UserId;
use std::collections::HashMap;

/// Lowest accepted score
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score
pub const MAX_SCORE: f64 = 10.0;

/// Check that a score lies in `[0, 10]`
pub fn validate_score(score: f64) -> Result<f64> {
    if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ClubError::invalid_input("Score must be between 0.0 and 10.0"));
    }
    Ok(score)
}

/// Round half away from zero to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounded mean of the given scores, `0` for an empty slice
pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: f64 = scores.iter().sum();
    round_to_tenth(total / scores.len() as f64)
}

/// One album's member scores keyed by user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSheet {
    scores: HashMap<UserId, f64>,
}

impl ScoreSheet {
    pub fn from_entries(entries: impl IntoIterator<Item = (UserId, f64)>) -> Self {
        Self {
            scores: entries.into_iter().collect(),
        }
    }

    /// Insert or replace a member's score, returning the previous value
    pub fn upsert(&mut self, user_id: UserId, score: f64) -> Result<Option<f64>> {
        let score = validate_score(score)?;
        Ok(self.scores.insert(user_id, score))
    }

    pub fn get(&self, user_id: &UserId) -> Option<f64> {
        self.scores.get(user_id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Current `average_user_score`
    pub fn average(&self) -> f64 {
        let values: Vec<f64> = self.scores.values().copied().collect();
        average(&values)
    }
}
