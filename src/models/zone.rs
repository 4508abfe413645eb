use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Training intensity zone, ordered from recovery (Z1) to sprint (Z5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    Z1,
    Z2,
    Z3,
    Z4,
    Z5,
}

impl ZoneId {
    /// All zones in ascending intensity
    pub const ALL: [ZoneId; 5] = [ZoneId::Z1, ZoneId::Z2, ZoneId::Z3, ZoneId::Z4, ZoneId::Z5];

    /// Zero-based position of the zone (Z1 = 0)
    pub fn index(self) -> usize {
        match self {
            ZoneId::Z1 => 0,
            ZoneId::Z2 => 1,
            ZoneId::Z3 => 2,
            ZoneId::Z4 => 3,
            ZoneId::Z5 => 4,
        }
    }

    /// Short physiological description
    pub fn description(self) -> &'static str {
        match self {
            ZoneId::Z1 => "recovery",
            ZoneId::Z2 => "aerobic base",
            ZoneId::Z3 => "tempo",
            ZoneId::Z4 => "threshold",
            ZoneId::Z5 => "VO2max / sprint",
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z{}", self.index() + 1)
    }
}

/// Distance in meters attributed to each zone.
///
/// All five zones are always present; keys missing from serialized input
/// read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneVolumeMap {
    #[serde(default)]
    pub z1: u32,
    #[serde(default)]
    pub z2: u32,
    #[serde(default)]
    pub z3: u32,
    #[serde(default)]
    pub z4: u32,
    #[serde(default)]
    pub z5: u32,
}

impl ZoneVolumeMap {
    /// Map with the whole distance in a single zone
    pub fn single(zone: ZoneId, meters: u32) -> Self {
        let mut map = Self::default();
        map.set(zone, meters);
        map
    }

    pub fn get(&self, zone: ZoneId) -> u32 {
        match zone {
            ZoneId::Z1 => self.z1,
            ZoneId::Z2 => self.z2,
            ZoneId::Z3 => self.z3,
            ZoneId::Z4 => self.z4,
            ZoneId::Z5 => self.z5,
        }
    }

    pub fn set(&mut self, zone: ZoneId, meters: u32) {
        match zone {
            ZoneId::Z1 => self.z1 = meters,
            ZoneId::Z2 => self.z2 = meters,
            ZoneId::Z3 => self.z3 = meters,
            ZoneId::Z4 => self.z4 = meters,
            ZoneId::Z5 => self.z5 = meters,
        }
    }

    /// Sum of all five zones
    pub fn total(&self) -> u64 {
        ZoneId::ALL.iter().map(|&z| u64::from(self.get(z))).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }

    /// Iterate over (zone, meters) pairs in zone order
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, u32)> + '_ {
        ZoneId::ALL.iter().map(move |&z| (z, self.get(z)))
    }

    /// Zone with the most volume; ties resolve to the lower zone
    pub fn dominant_zone(&self) -> Option<ZoneId> {
        if self.is_zero() {
            return None;
        }
        self.iter()
            .fold(None, |best: Option<(ZoneId, u32)>, (zone, meters)| match best {
                Some((_, best_meters)) if best_meters >= meters => best,
                _ => Some((zone, meters)),
            })
            .map(|(zone, _)| zone)
    }
}

impl Add for ZoneVolumeMap {
    type Output = ZoneVolumeMap;

    fn add(mut self, rhs: ZoneVolumeMap) -> ZoneVolumeMap {
        self += rhs;
        self
    }
}

impl AddAssign for ZoneVolumeMap {
    fn add_assign(&mut self, rhs: ZoneVolumeMap) {
        for zone in ZoneId::ALL {
            self.set(zone, self.get(zone).saturating_add(rhs.get(zone)));
        }
    }
}

impl Sum for ZoneVolumeMap {
    fn sum<I: Iterator<Item = ZoneVolumeMap>>(iter: I) -> Self {
        iter.fold(ZoneVolumeMap::default(), |acc, map| acc + map)
    }
}

/// Raw keyword-hit counts per zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneHits([u32; 5]);

impl ZoneHits {
    pub fn get(&self, zone: ZoneId) -> u32 {
        self.0[zone.index()]
    }

    pub fn add(&mut self, zone: ZoneId, hits: u32) {
        self.0[zone.index()] += hits;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Zones with at least one hit
    pub fn detected(&self) -> impl Iterator<Item = ZoneId> + '_ {
        ZoneId::ALL.into_iter().filter(|&z| self.get(z) > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_ordering_and_display() {
        assert!(ZoneId::Z1 < ZoneId::Z5);
        assert_eq!(ZoneId::Z3.to_string(), "Z3");
        assert_eq!(ZoneId::ALL.len(), 5);
    }

    #[test]
    fn test_volume_map_missing_keys_default_to_zero() {
        let map: ZoneVolumeMap = serde_json::from_str(r#"{"z2": 400, "z4": 100}"#).unwrap();

        assert_eq!(map.z1, 0);
        assert_eq!(map.get(ZoneId::Z2), 400);
        assert_eq!(map.total(), 500);
    }

    #[test]
    fn test_volume_map_add_is_elementwise() {
        let a = ZoneVolumeMap::single(ZoneId::Z1, 200);
        let b = ZoneVolumeMap {
            z1: 100,
            z3: 300,
            ..Default::default()
        };

        let sum = a + b;
        assert_eq!(sum.z1, 300);
        assert_eq!(sum.z3, 300);
        assert_eq!(sum.total(), 600);
    }

    #[test]
    fn test_dominant_zone_prefers_lower_on_tie() {
        let map = ZoneVolumeMap {
            z2: 500,
            z4: 500,
            ..Default::default()
        };
        assert_eq!(map.dominant_zone(), Some(ZoneId::Z2));
        assert_eq!(ZoneVolumeMap::default().dominant_zone(), None);
    }
}
