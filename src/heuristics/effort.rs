use serde::{Deserialize, Serialize};

use crate::models::{ZoneId, ZoneVolumeMap};

/// Lowest valid effort rating
pub const MIN_EFFORT: f64 = 1.0;
/// Highest valid effort rating
pub const MAX_EFFORT: f64 = 10.0;
/// Zone assigned when a session has no effort rating (aerobic base)
pub const DEFAULT_EFFORT_ZONE: ZoneId = ZoneId::Z2;

/// Result of mapping an effort rating to a single zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortClassification {
    pub zone: ZoneId,
    /// Rating after clamping to [1, 10], if a usable one was supplied
    pub rating: Option<f64>,
    /// The supplied rating was outside [1, 10] and was clamped
    pub out_of_range: bool,
    /// No usable rating was supplied and the default zone was used
    pub defaulted: bool,
}

impl EffortClassification {
    /// Attribute the whole session distance to the classified zone
    pub fn volumes(&self, distance_m: u32) -> ZoneVolumeMap {
        ZoneVolumeMap::single(self.zone, distance_m)
    }
}

/// Zone for a rating already clamped to [1, 10]. Whole ratings follow the
/// 1-3 / 4-5 / 6-7 / 8-9 / 10 table; fractions fall into the band whose
/// lower bound they have reached (6.5 is Z3, 9.9 is Z4).
fn zone_for_rating(rating: f64) -> ZoneId {
    if rating < 4.0 {
        ZoneId::Z1
    } else if rating < 6.0 {
        ZoneId::Z2
    } else if rating < 8.0 {
        ZoneId::Z3
    } else if rating < 10.0 {
        ZoneId::Z4
    } else {
        ZoneId::Z5
    }
}

fn default_classification() -> EffortClassification {
    EffortClassification {
        zone: DEFAULT_EFFORT_ZONE,
        rating: None,
        out_of_range: false,
        defaulted: true,
    }
}

/// Map an effort rating to exactly one zone.
///
/// Out-of-range ratings are clamped to the nearest bound and flagged;
/// a missing or NaN rating yields `DEFAULT_EFFORT_ZONE`.
pub fn classify_effort(rating: Option<f64>) -> EffortClassification {
    match rating {
        Some(raw) if !raw.is_nan() => {
            let clamped = raw.clamp(MIN_EFFORT, MAX_EFFORT);
            EffortClassification {
                zone: zone_for_rating(clamped),
                rating: Some(clamped),
                out_of_range: clamped != raw,
                defaulted: false,
            }
        }
        _ => default_classification(),
    }
}
