use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::zones::Zone;

/// One aggregated value per distinct dimension, keyed by the literal name.
pub type DimensionScores = BTreeMap<String, f64>;

/// Final output of one scoring run. Field names are the `results.json` contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    #[serde(rename = "T")]
    pub t: f64,
    #[serde(rename = "K_eff")]
    pub k_eff: f64,
    pub zone: Zone,
    pub dimension_scores: DimensionScores,
}
