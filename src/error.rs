use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::aggregation::AggregationMethod;
use crate::telemetry::TelemetryError;

/// Failures of the scoring core. The first violation aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("item #{index} {reason}")]
    InvalidItem { index: usize, reason: String },

    #[error("unknown aggregation method for dimension '{dimension}': {method}")]
    UnknownAggregationMethod { dimension: String, method: String },

    #[error("no scores for dimension {0}")]
    NoScoresForDimension(String),

    #[error("replicated score count for dimension {dimension} exceeds the supported range")]
    MultiplicityOverflow { dimension: String },

    #[error("conflicting aggregation methods for tau aliases: tau={tau}, τ={tau_symbol}")]
    ConflictingAliasSpec {
        tau: AggregationMethod,
        tau_symbol: AggregationMethod,
    },
}

impl ScoringError {
    pub fn invalid_item(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidItem {
            index,
            reason: reason.into(),
        }
    }

    /// Aggregation-spec problems come from command-line flags, not input data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownAggregationMethod { .. } | Self::ConflictingAliasSpec { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("Invalid JSON input: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("{0}")]
    Usage(String),
}

impl AppError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Usage-style problems exit with 2, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Scoring(err) if err.is_configuration() => 2,
            _ => 1,
        }
    }
}
