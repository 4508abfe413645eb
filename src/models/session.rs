use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::ZoneVolumeMap;

/// A training session as supplied by the session store.
///
/// Fields the engine does not model are kept in `extra` so a write-back
/// returns them untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Calendar date the session took place
    pub date: NaiveDate,
    /// Free-text workout description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Subjective effort rating (1-10, fractions allowed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort_rating: Option<f64>,
    /// Recorded total distance in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<u32>,
    /// Previously persisted or coach-confirmed zone volumes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_volumes: Option<ZoneVolumeMap>,
    /// Store fields outside the engine's concern
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: None,
            effort_rating: None,
            distance_m: None,
            zone_volumes: None,
            extra: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_effort(mut self, rating: f64) -> Self {
        self.effort_rating = Some(rating);
        self
    }

    pub fn with_distance(mut self, meters: u32) -> Self {
        self.distance_m = Some(meters);
        self
    }

    pub fn with_zone_volumes(mut self, volumes: ZoneVolumeMap) -> Self {
        self.zone_volumes = Some(volumes);
        self
    }

    /// Description text, if present and not blank
    pub fn text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Which source produced a session's effective zone volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSource {
    /// Persisted on the session (manual or previously confirmed)
    Persisted,
    /// Accepted remote classifier response
    Remote,
    /// Heuristic text classification
    Heuristic,
    /// Numeric effort rating (or the default zone)
    Effort,
}

/// A session paired with its effective zone volumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSession {
    pub session_id: Uuid,
    pub date: NaiveDate,
    pub volumes: ZoneVolumeMap,
    pub source: ZoneSource,
}

impl ResolvedSession {
    /// Whether the resolved volumes should be written back to the store
    pub fn needs_write_back(&self) -> bool {
        self.source != ZoneSource::Persisted
    }
}
