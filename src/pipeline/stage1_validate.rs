use serde_json::{Map, Number, Value};

use crate::error::ScoringError;
use crate::model::item::{DEFAULT_WEIGHT, SCORE_MAX, SCORE_MIN, ScoredItem, ValidatedInput};

/// Validates a raw payload into typed items, all-or-nothing.
///
/// Checks run in a fixed order and the first failing item (in list order)
/// decides the error: object shape, `dimension` present, `score` present,
/// `dimension` a non-blank string, `score` an integer in `0..=3`, and
/// `weight` (when present) a number above zero. Booleans never pass as
/// numbers.
pub fn validate(payload: &Value) -> Result<ValidatedInput, ScoringError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ScoringError::MalformedInput("input must be a JSON object".to_string()))?;

    let system = object
        .get("system")
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    let raw_items: &[Value] = match object.get("items") {
        None => &[],
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ScoringError::MalformedInput(
                "'items' must be a list".to_string(),
            ));
        }
    };

    let mut items = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.iter().enumerate() {
        items.push(validate_item(index, raw)?);
    }

    Ok(ValidatedInput { system, items })
}

fn validate_item(index: usize, raw: &Value) -> Result<ScoredItem, ScoringError> {
    let fields = raw
        .as_object()
        .ok_or_else(|| ScoringError::invalid_item(index, "must be an object"))?;

    let dimension = fields
        .get("dimension")
        .ok_or_else(|| ScoringError::invalid_item(index, "missing 'dimension'"))?;
    let score = fields
        .get("score")
        .ok_or_else(|| ScoringError::invalid_item(index, "missing 'score'"))?;

    let dimension = match dimension.as_str() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => return Err(ScoringError::invalid_item(index, "invalid 'dimension'")),
    };

    let score = parse_score(index, score)?;

    let weight = match fields.get("weight") {
        None => DEFAULT_WEIGHT,
        Some(value) => parse_weight(index, value)?,
    };

    let justification = fields
        .get("justification")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ScoredItem {
        dimension,
        score,
        weight,
        justification,
    })
}

fn parse_score(index: usize, value: &Value) -> Result<u8, ScoringError> {
    let Value::Number(number) = value else {
        return Err(ScoringError::invalid_item(
            index,
            "'score' must be int (0..3)",
        ));
    };
    match integer_of(number) {
        Some(score) if (SCORE_MIN..=SCORE_MAX).contains(&score) => u8::try_from(score)
            .map_err(|_| ScoringError::invalid_item(index, "'score' out of range (0..3)")),
        Some(_) => Err(ScoringError::invalid_item(
            index,
            "'score' out of range (0..3)",
        )),
        None if number.is_u64() || is_wide_integer(number) => Err(ScoringError::invalid_item(
            index,
            "'score' out of range (0..3)",
        )),
        None => Err(ScoringError::invalid_item(
            index,
            "'score' must be int (0..3)",
        )),
    }
}

fn integer_of(number: &Number) -> Option<i64> {
    if number.is_f64() {
        None
    } else {
        number.as_i64()
    }
}

/// Integer literals beyond 64 bits arrive as whole floats of at least 2^63.
fn is_wide_integer(number: &Number) -> bool {
    number
        .as_f64()
        .is_some_and(|v| v.is_finite() && v.fract() == 0.0 && v.abs() >= i64::MAX as f64)
}

fn parse_weight(index: usize, value: &Value) -> Result<f64, ScoringError> {
    let weight = match value {
        Value::Number(number) => number.as_f64(),
        _ => None,
    }
    .ok_or_else(|| ScoringError::invalid_item(index, "'weight' must be numeric"))?;

    if weight > 0.0 {
        Ok(weight)
    } else {
        Err(ScoringError::invalid_item(index, "'weight' must be > 0"))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
