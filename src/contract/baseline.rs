use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::AppError;

/// Top-level report keys that change on every run.
pub const VOLATILE_TOPLEVEL_KEYS: [&str; 4] = [
    "validation_timestamp",
    "instrument_path",
    "instrument_hash",
    "_probe_forensics",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineOutcome {
    Written { path: PathBuf },
    Matched,
    Drifted { keys: Vec<String> },
}

/// Rebuilds every object with keys in sorted order.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (key, inner) in entries {
                out.insert(key.clone(), canonicalize(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

pub fn strip_volatile(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(key, _)| !VOLATILE_TOPLEVEL_KEYS.contains(&key.as_str()))
                .map(|(key, inner)| (key.clone(), inner.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Top-level keys whose values differ after stripping volatile keys.
/// A non-object on either side reports the pseudo-key `$root`.
pub fn diff_keys(baseline: &Value, current: &Value) -> Vec<String> {
    let baseline = canonicalize(&strip_volatile(baseline));
    let current = canonicalize(&strip_volatile(current));

    match (&baseline, &current) {
        (Value::Object(b), Value::Object(c)) => {
            let keys: BTreeSet<&String> = b.keys().chain(c.keys()).collect();
            keys.into_iter()
                .filter(|key| b.get(*key) != c.get(*key))
                .cloned()
                .collect()
        }
        _ if baseline == current => Vec::new(),
        _ => vec!["$root".to_string()],
    }
}

pub fn write_baseline(path: &Path, current: &Value) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
    }
    let mut json =
        serde_json::to_string_pretty(&canonicalize(current)).map_err(|source| AppError::Encode {
            what: "contract baseline",
            source,
        })?;
    json.push('\n');
    fs::write(path, json).map_err(|e| AppError::io(path, e))
}

/// Writes the baseline when asked to or when none exists yet; otherwise
/// compares the stored baseline with `current`.
pub fn check(path: &Path, update: bool, current: &Value) -> Result<BaselineOutcome, AppError> {
    if update || !path.exists() {
        write_baseline(path, current)?;
        tracing::info!(path = %path.display(), update, "contract baseline written");
        return Ok(BaselineOutcome::Written {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let baseline: Value = serde_json::from_str(&raw).map_err(AppError::InvalidJson)?;

    let keys = diff_keys(&baseline, current);
    if keys.is_empty() {
        tracing::info!(path = %path.display(), "contract baseline matches");
        Ok(BaselineOutcome::Matched)
    } else {
        tracing::warn!(path = %path.display(), drifted = ?keys, "contract baseline drift detected");
        Ok(BaselineOutcome::Drifted { keys })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/contract/baseline.rs"]
mod tests;
