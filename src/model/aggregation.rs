use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ScoringError;
use crate::model::formula::{DIM_TAU_ASCII, DIM_TAU_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    #[default]
    Median,
    Bottleneck,
}

impl AggregationMethod {
    /// Case-insensitive, whitespace-trimmed parse.
    pub fn parse(dimension: &str, raw: &str) -> Result<Self, ScoringError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "median" => Ok(Self::Median),
            "bottleneck" => Ok(Self::Bottleneck),
            _ => Err(ScoringError::UnknownAggregationMethod {
                dimension: dimension.to_string(),
                method: raw.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Bottleneck => "bottleneck",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-dimension aggregation methods.
///
/// `tau` and `τ` always resolve to the same method: naming one extends the
/// spec to the other, naming both with different methods is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationSpec {
    methods: BTreeMap<String, AggregationMethod>,
}

impl AggregationSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a spec from raw `(dimension, method)` pairs. A repeated
    /// dimension key keeps the last method given for it.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut methods = BTreeMap::new();
        for (dimension, raw) in pairs {
            let dimension = dimension.into();
            let method = AggregationMethod::parse(&dimension, raw.as_ref())?;
            methods.insert(dimension, method);
        }
        Self::from_methods(methods)
    }

    pub fn from_methods(
        mut methods: BTreeMap<String, AggregationMethod>,
    ) -> Result<Self, ScoringError> {
        let ascii = methods.get(DIM_TAU_ASCII).copied();
        let symbol = methods.get(DIM_TAU_SYMBOL).copied();
        match (ascii, symbol) {
            (Some(tau), Some(tau_symbol)) if tau != tau_symbol => {
                return Err(ScoringError::ConflictingAliasSpec { tau, tau_symbol });
            }
            (Some(tau), None) => {
                methods.insert(DIM_TAU_SYMBOL.to_string(), tau);
            }
            (None, Some(tau_symbol)) => {
                methods.insert(DIM_TAU_ASCII.to_string(), tau_symbol);
            }
            _ => {}
        }
        Ok(Self { methods })
    }

    pub fn with_method(
        &self,
        dimension: &str,
        method: AggregationMethod,
    ) -> Result<Self, ScoringError> {
        let mut methods = self.methods.clone();
        methods.insert(dimension.to_string(), method);
        Self::from_methods(methods)
    }

    /// Method for a dimension, `median` when unspecified.
    pub fn method_for(&self, dimension: &str) -> AggregationMethod {
        self.methods.get(dimension).copied().unwrap_or_default()
    }

    pub fn get(&self, dimension: &str) -> Option<AggregationMethod> {
        self.methods.get(dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AggregationMethod)> {
        self.methods.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/aggregation.rs"]
mod tests;
