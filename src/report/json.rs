use serde::Serialize;

use crate::model::scores::ScoreResult;

/// Pretty JSON with two-space indent; non-ASCII dimension names stay as-is.
pub fn render_results_json(result: &ScoreResult) -> serde_json::Result<String> {
    render_pretty(result)
}

pub fn render_pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
