//! Scoring engine: validate, aggregate per dimension, compute `T`/`K_eff`,
//! classify into a zone. Every stage is a pure function of its inputs.

pub mod stage1_validate;
pub mod stage2_aggregate;
pub mod stage3_metrics;
pub mod stage4_zone;

use serde_json::Value;

use crate::error::ScoringError;
use crate::model::aggregation::AggregationSpec;
use crate::model::item::{ScoredItem, ValidatedInput};
use crate::model::scores::ScoreResult;
use crate::model::zones::ZoneThresholds;
use crate::pipeline::stage1_validate::validate;
use crate::pipeline::stage2_aggregate::run_stage2;
use crate::pipeline::stage3_metrics::run_stage3;
use crate::pipeline::stage4_zone::classify_zone;

pub fn score(items: &[ScoredItem], spec: &AggregationSpec) -> Result<ScoreResult, ScoringError> {
    score_with(items, spec, &ZoneThresholds::default_v1())
}

pub fn score_with(
    items: &[ScoredItem],
    spec: &AggregationSpec,
    thresholds: &ZoneThresholds,
) -> Result<ScoreResult, ScoringError> {
    let dimension_scores = run_stage2(items, spec)?;
    let metrics = run_stage3(&dimension_scores);
    let zone = classify_zone(metrics.t, thresholds);

    tracing::info!(
        t = metrics.t,
        k_eff = metrics.k_eff,
        zone = %zone,
        dimensions = dimension_scores.len(),
        "scored items"
    );

    Ok(ScoreResult {
        t: metrics.t,
        k_eff: metrics.k_eff,
        zone,
        dimension_scores,
    })
}

/// Validates a raw payload and scores it in one call.
pub fn score_payload(
    payload: &Value,
    spec: &AggregationSpec,
) -> Result<(ValidatedInput, ScoreResult), ScoringError> {
    let input = validate(payload)?;
    let result = score(&input.items, spec)?;
    Ok((input, result))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/engine.rs"]
mod tests;
