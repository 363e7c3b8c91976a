use std::fmt;

use serde::Serialize;

/// Ordered classification bands, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Zone {
    Z0,
    Z1,
    Z2,
    Z3,
    Z4,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Z0, Zone::Z1, Zone::Z2, Zone::Z3, Zone::Z4];

    pub fn label(&self) -> &'static str {
        match self {
            Zone::Z0 => "Z0",
            Zone::Z1 => "Z1",
            Zone::Z2 => "Z2",
            Zone::Z3 => "Z3",
            Zone::Z4 => "Z4",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Left-closed lower bounds of `Z1..=Z4`; anything below the first is `Z0`.
pub const ZONE_BOUNDARIES: [f64; 4] = [0.0, 1.0, 2.0, 3.0];

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneThresholds {
    pub boundaries: [f64; 4],
}

impl ZoneThresholds {
    pub fn default_v1() -> Self {
        Self {
            boundaries: ZONE_BOUNDARIES,
        }
    }

    /// Inclusive lower bound of a zone; `Z0` is unbounded below.
    pub fn lower_bound(&self, zone: Zone) -> Option<f64> {
        match zone.index() {
            0 => None,
            idx => Some(self.boundaries[idx - 1]),
        }
    }

    /// Exclusive upper bound of a zone; `Z4` is unbounded above.
    pub fn upper_bound(&self, zone: Zone) -> Option<f64> {
        self.boundaries.get(zone.index()).copied()
    }
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}
