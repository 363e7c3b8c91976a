use std::collections::BTreeMap;

use crate::error::ScoringError;
use crate::model::aggregation::{AggregationMethod, AggregationSpec};
use crate::model::formula::DIM_CAPACITY;
use crate::model::item::ScoredItem;
use crate::model::scores::DimensionScores;

/// Replicated score list for one dimension, stored as counts per score value.
///
/// Equivalent to pushing each score `multiplicity` times into a list, without
/// materializing the list. Counts are exact; a total beyond `u128` is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTally {
    counts: BTreeMap<u8, u128>,
    total: u128,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores(scores: &[u8]) -> Self {
        let mut tally = Self::new();
        for &score in scores {
            tally.counts.entry(score).and_modify(|c| *c += 1).or_insert(1);
            tally.total += 1;
        }
        tally
    }

    /// Adds `multiplicity` copies of `score`. Returns `None`, leaving the
    /// tally unchanged, when the total would overflow.
    pub fn push(&mut self, score: u8, multiplicity: u128) -> Option<()> {
        if multiplicity == 0 {
            return Some(());
        }
        let total = self.total.checked_add(multiplicity)?;
        let slot = self.counts.entry(score).or_insert(0);
        *slot += multiplicity;
        self.total = total;
        Some(())
    }

    pub fn len(&self) -> u128 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn min(&self) -> Option<f64> {
        self.counts.keys().next().map(|&s| f64::from(s))
    }

    pub fn max(&self) -> Option<f64> {
        self.counts.keys().next_back().map(|&s| f64::from(s))
    }

    /// Average of the two middle values for even lengths.
    pub fn median(&self) -> Option<f64> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let lo = self.nth((n - 1) / 2)?;
        let hi = self.nth(n / 2)?;
        Some((f64::from(lo) + f64::from(hi)) / 2.0)
    }

    /// Value at a zero-based rank of the sorted replicated list.
    fn nth(&self, rank: u128) -> Option<u8> {
        let mut seen = 0u128;
        for (&score, &count) in &self.counts {
            seen += count;
            if rank < seen {
                return Some(score);
            }
        }
        None
    }
}

/// Groups items by literal dimension name, replicating each score by the
/// item's weight multiplicity.
pub fn group_by_dimension(
    items: &[ScoredItem],
) -> Result<BTreeMap<String, ScoreTally>, ScoringError> {
    let mut by_dim: BTreeMap<String, ScoreTally> = BTreeMap::new();
    for item in items {
        let overflow = || ScoringError::MultiplicityOverflow {
            dimension: item.dimension.clone(),
        };
        let multiplicity = item.multiplicity().ok_or_else(overflow)?;
        by_dim
            .entry(item.dimension.clone())
            .or_default()
            .push(item.score, multiplicity)
            .ok_or_else(overflow)?;
    }
    Ok(by_dim)
}

/// `bottleneck` takes the minimum for `K` and the maximum elsewhere.
pub fn aggregate(
    dimension: &str,
    tally: &ScoreTally,
    method: AggregationMethod,
) -> Result<f64, ScoringError> {
    let value = match method {
        AggregationMethod::Median => tally.median(),
        AggregationMethod::Bottleneck if dimension == DIM_CAPACITY => tally.min(),
        AggregationMethod::Bottleneck => tally.max(),
    };
    value.ok_or_else(|| ScoringError::NoScoresForDimension(dimension.to_string()))
}

pub fn run_stage2(
    items: &[ScoredItem],
    spec: &AggregationSpec,
) -> Result<DimensionScores, ScoringError> {
    let grouped = group_by_dimension(items)?;
    let mut out = DimensionScores::new();
    for (dimension, tally) in &grouped {
        let method = spec.method_for(dimension);
        let value = aggregate(dimension, tally, method)?;
        tracing::debug!(
            dimension = %dimension,
            method = %method,
            n = tally.len(),
            value,
            "aggregated dimension"
        );
        out.insert(dimension.clone(), value);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
