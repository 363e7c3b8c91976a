use crate::model::formula::{
    DENOMINATOR_BASE, DIM_CAPACITY, DIM_COMPLEXITY, DIM_DIFFICULTY, DIM_GENERALITY, DIM_TAU_ASCII,
    DIM_TAU_SYMBOL, MISSING_DIMENSION_VALUE,
};
use crate::model::scores::DimensionScores;

/// Core dimension values after alias resolution and defaulting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreDimensions {
    pub cx: f64,
    pub k: f64,
    pub tau: f64,
    pub g: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub t: f64,
    pub k_eff: f64,
}

/// `τ` is preferred over `tau`; missing dimensions count as 0.0.
pub fn resolve_core(scores: &DimensionScores) -> CoreDimensions {
    let lookup = |dimension: &str| {
        let value = scores.get(dimension).copied();
        if value.is_none() {
            tracing::debug!(dimension, "core dimension not scored; using default");
        }
        value
    };

    let tau = scores
        .get(DIM_TAU_SYMBOL)
        .or_else(|| scores.get(DIM_TAU_ASCII))
        .copied()
        .unwrap_or_else(|| {
            tracing::debug!(dimension = DIM_TAU_SYMBOL, "core dimension not scored; using default");
            MISSING_DIMENSION_VALUE
        });

    CoreDimensions {
        cx: lookup(DIM_COMPLEXITY).unwrap_or(MISSING_DIMENSION_VALUE),
        k: lookup(DIM_CAPACITY).unwrap_or(MISSING_DIMENSION_VALUE),
        tau,
        g: lookup(DIM_GENERALITY).unwrap_or(MISSING_DIMENSION_VALUE),
        d: lookup(DIM_DIFFICULTY).unwrap_or(MISSING_DIMENSION_VALUE),
    }
}

pub fn compute_metrics(core: &CoreDimensions) -> Metrics {
    let denom = DENOMINATOR_BASE + core.tau + core.g + core.d + core.cx;
    let k_eff = if denom != 0.0 {
        core.k / denom
    } else {
        f64::INFINITY
    };
    let t = core.cx + core.tau + core.g + core.d - k_eff;
    Metrics { t, k_eff }
}

pub fn run_stage3(scores: &DimensionScores) -> Metrics {
    compute_metrics(&resolve_core(scores))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_metrics.rs"]
mod tests;
