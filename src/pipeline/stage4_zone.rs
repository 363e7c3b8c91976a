use crate::model::zones::{Zone, ZoneThresholds};

/// Left-closed, right-open banding of `T`; no smoothing or hysteresis.
pub fn classify_zone(t: f64, thresholds: &ZoneThresholds) -> Zone {
    for (idx, &bound) in thresholds.boundaries.iter().enumerate() {
        if t < bound {
            return Zone::ALL[idx];
        }
    }
    Zone::Z4
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_zone.rs"]
mod tests;
