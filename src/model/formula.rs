//! Formula constants for the composite metrics.
//!
//! ```text
//! denom = 1 + τ + G + D + Cx
//! K_eff = K / denom
//! T     = Cx + τ + G + D - K_eff
//! ```

use serde::Serialize;

pub const DIM_COMPLEXITY: &str = "Cx";
pub const DIM_CAPACITY: &str = "K";
pub const DIM_TAU_SYMBOL: &str = "τ";
pub const DIM_TAU_ASCII: &str = "tau";
pub const DIM_GENERALITY: &str = "G";
pub const DIM_DIFFICULTY: &str = "D";

/// Canonical dimension order used by the template.
pub const CORE_DIMENSIONS: [&str; 5] = [
    DIM_COMPLEXITY,
    DIM_CAPACITY,
    DIM_TAU_SYMBOL,
    DIM_GENERALITY,
    DIM_DIFFICULTY,
];

pub const DENOMINATOR_BASE: f64 = 1.0;
pub const MISSING_DIMENSION_VALUE: f64 = 0.0;

pub const GOLDEN_REL_TOLERANCE: f64 = 1e-5;
pub const GOLDEN_ABS_TOLERANCE: f64 = 1e-8;

pub const K_EFF_EXPRESSION: &str = "K / (1 + τ + G + D + Cx)";
pub const T_EXPRESSION: &str = "Cx + τ + G + D - K_eff";

pub fn is_tau(dimension: &str) -> bool {
    dimension == DIM_TAU_SYMBOL || dimension == DIM_TAU_ASCII
}

/// Closeness test with both a relative and an absolute tolerance.
pub fn is_close(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let diff = (a - b).abs();
    diff <= (rel_tol * a.abs().max(b.abs())).max(abs_tol)
}

pub fn is_golden_close(observed: f64, expected: f64) -> bool {
    is_close(observed, expected, GOLDEN_REL_TOLERANCE, GOLDEN_ABS_TOLERANCE)
}

/// Queryable description of the formula, embedded in contract reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaDeclaration {
    pub k_eff: &'static str,
    pub t: &'static str,
    pub denominator_base: f64,
    pub capacity_dimension: &'static str,
    pub additive_dimensions: Vec<&'static str>,
    pub tau_aliases: Vec<&'static str>,
    pub missing_dimension_value: f64,
}

pub fn declaration() -> FormulaDeclaration {
    FormulaDeclaration {
        k_eff: K_EFF_EXPRESSION,
        t: T_EXPRESSION,
        denominator_base: DENOMINATOR_BASE,
        capacity_dimension: DIM_CAPACITY,
        additive_dimensions: vec![
            DIM_COMPLEXITY,
            DIM_TAU_SYMBOL,
            DIM_GENERALITY,
            DIM_DIFFICULTY,
        ],
        tau_aliases: vec![DIM_TAU_SYMBOL, DIM_TAU_ASCII],
        missing_dimension_value: MISSING_DIMENSION_VALUE,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/formula.rs"]
mod tests;
