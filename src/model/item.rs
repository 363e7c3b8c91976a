use serde::Serialize;
use serde_json::{Map, Value};

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 3;
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// One validated observation for a single dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub dimension: String,
    pub score: u8,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

impl ScoredItem {
    pub fn new(dimension: impl Into<String>, score: u8) -> Self {
        Self {
            dimension: dimension.into(),
            score,
            weight: DEFAULT_WEIGHT,
            justification: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }

    pub fn multiplicity(&self) -> Option<u128> {
        multiplicity(self.weight)
    }
}

/// Replication count for a weight: round half to even, never below 1.
///
/// `2.5 -> 2`, `3.5 -> 4`, `0.5 -> 1` (floor), `0.0001 -> 1` (floor).
/// `None` when the rounded weight does not fit in `u128`.
pub fn multiplicity(weight: f64) -> Option<u128> {
    let rounded = weight.round_ties_even();
    if rounded < 1.0 {
        Some(1)
    } else if rounded < u128::MAX as f64 {
        Some(rounded as u128)
    } else {
        None
    }
}

/// Output of the input validator: the untouched `system` block plus typed items.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub system: Value,
    pub items: Vec<ScoredItem>,
}

impl ValidatedInput {
    pub fn new(items: Vec<ScoredItem>) -> Self {
        Self {
            system: Value::Object(Map::new()),
            items,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/item.rs"]
mod tests;
