//! PhiO instrument: turns scored dimension items into the composite metric
//! `T`, the effective capacity `K_eff` and a zone `Z0..Z4`, and verifies its
//! own CLI/zone/formula contract.

pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod telemetry;
pub mod template;

pub use error::{AppError, ScoringError};
pub use model::{AggregationMethod, AggregationSpec, ScoreResult, ScoredItem, Zone};
pub use pipeline::{score, score_payload};
