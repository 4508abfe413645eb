use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ResolvedSession, ZoneId, ZoneVolumeMap};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the date falls within the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Smallest range covering both
    pub fn union(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Reporting bucket granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    /// ISO week, Monday through Sunday
    Week,
    Month,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            other => Err(format!("unknown period '{}' (expected day, week or month)", other)),
        }
    }
}

/// Share of total volume per zone, in percent rounded to one decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZonePercentages {
    pub z1: f64,
    pub z2: f64,
    pub z3: f64,
    pub z4: f64,
    pub z5: f64,
}

impl ZonePercentages {
    /// Percentages of the map's total; all zero when the total is zero
    pub fn from_volumes(volumes: &ZoneVolumeMap) -> Self {
        let total = volumes.total();
        let pct = |zone: ZoneId| {
            if total == 0 {
                0.0
            } else {
                let raw = f64::from(volumes.get(zone)) / total as f64 * 100.0;
                (raw * 10.0).round() / 10.0
            }
        };

        Self {
            z1: pct(ZoneId::Z1),
            z2: pct(ZoneId::Z2),
            z3: pct(ZoneId::Z3),
            z4: pct(ZoneId::Z4),
            z5: pct(ZoneId::Z5),
        }
    }

    pub fn get(&self, zone: ZoneId) -> f64 {
        match zone {
            ZoneId::Z1 => self.z1,
            ZoneId::Z2 => self.z2,
            ZoneId::Z3 => self.z3,
            ZoneId::Z4 => self.z4,
            ZoneId::Z5 => self.z5,
        }
    }
}

/// Zone volumes summed over the sessions of a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    pub range: DateRange,
    /// Contributing sessions in date order
    pub sessions: Vec<ResolvedSession>,
    pub volumes: ZoneVolumeMap,
    pub percentages: ZonePercentages,
    pub total_distance_m: u64,
    pub session_count: usize,
}

impl PeriodAggregate {
    /// Aggregate with no contributing sessions
    pub fn empty(range: DateRange) -> Self {
        Self::from_sessions(range, Vec::new())
    }

    /// Build the aggregate from sessions already known to fall in range
    pub fn from_sessions(range: DateRange, mut sessions: Vec<ResolvedSession>) -> Self {
        sessions.sort_by_key(|s| s.date);
        let volumes: ZoneVolumeMap = sessions.iter().map(|s| s.volumes).sum();

        Self {
            range,
            session_count: sessions.len(),
            total_distance_m: volumes.total(),
            percentages: ZonePercentages::from_volumes(&volumes),
            volumes,
            sessions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.session_count == 0
    }

    pub fn dominant_zone(&self) -> Option<ZoneId> {
        self.volumes.dominant_zone()
    }
}

/// Merge two aggregates; with disjoint ranges this equals aggregating the union
impl Add for PeriodAggregate {
    type Output = PeriodAggregate;

    fn add(self, rhs: PeriodAggregate) -> PeriodAggregate {
        let range = self.range.union(&rhs.range);
        let mut sessions = self.sessions;
        sessions.extend(rhs.sessions);
        PeriodAggregate::from_sessions(range, sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date(1), date(7));
        assert!(range.contains(date(1)));
        assert!(range.contains(date(7)));
        assert!(!range.contains(date(8)));
    }

    #[test]
    fn test_percentages_of_zero_total() {
        let pct = ZonePercentages::from_volumes(&ZoneVolumeMap::default());
        assert_eq!(pct, ZonePercentages::default());
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        let volumes = ZoneVolumeMap {
            z1: 1,
            z2: 2,
            ..Default::default()
        };
        let pct = ZonePercentages::from_volumes(&volumes);
        assert_eq!(pct.z1, 33.3);
        assert_eq!(pct.z2, 66.7);
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("Week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("monthly".parse::<Period>().unwrap(), Period::Month);
        assert!("fortnight".parse::<Period>().is_err());
    }
}
