pub mod aggregation;
pub mod formula;
pub mod item;
pub mod scores;
pub mod zones;

pub use aggregation::{AggregationMethod, AggregationSpec};
pub use item::{ScoredItem, ValidatedInput};
pub use scores::{DimensionScores, ScoreResult};
pub use zones::{Zone, ZoneThresholds};
