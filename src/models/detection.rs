use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ZoneHits, ZoneId, ZoneVolumeMap};

/// Output of heuristic classification for one text input.
///
/// Zones are tracked as hit *counts* because the volume split is proportional
/// to them. Strokes and intensities only ever need presence, so they are
/// tracked as *sets* of canonical labels and repeated mentions add nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Zones with at least one keyword hit
    pub zones: BTreeSet<ZoneId>,
    /// Keyword hits per zone
    pub zone_hits: ZoneHits,
    /// Distinct canonical stroke labels
    pub strokes: BTreeSet<String>,
    /// Distinct canonical intensity labels
    pub intensities: BTreeSet<String>,
    /// Sum of all distance tokens, in meters
    pub distance_m: u32,
    /// Extracted distance split across zones by hit proportion
    pub volumes: ZoneVolumeMap,
    /// Advisory suggestions, ordered and deduplicated
    pub suggestions: Vec<String>,
    /// Confidence score (0-100)
    pub confidence: u8,
}

impl DetectionRecord {
    pub fn has_zones(&self) -> bool {
        !self.zones.is_empty()
    }

    pub fn has_distance(&self) -> bool {
        self.distance_m > 0
    }
}
