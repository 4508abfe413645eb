use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ZoneVolumeMap;

/// Time of day the session is planned or was swum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
        };
        f.write_str(name)
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" | "am" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" | "pm" => Ok(TimeSlot::Evening),
            other => Err(format!("unknown time slot '{}'", other)),
        }
    }
}

/// Request to the remote zone classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteClassificationRequest {
    /// Free-text workout description
    pub text: String,
    /// Stated training objective for the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
}

impl RemoteClassificationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            objective: None,
            time_slot: None,
        }
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slot = Some(slot);
        self
    }
}

/// Validated reply from the remote zone classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteClassificationResponse {
    pub volumes: ZoneVolumeMap,
    /// Confidence score (0-100)
    pub confidence: u8,
    /// Natural-language rationale for the distribution
    pub reasoning: String,
    pub suggestions: Vec<String>,
    /// Set when this is the fixed degraded response rather than a real reply
    #[serde(default)]
    pub is_fallback: bool,
}

impl RemoteClassificationResponse {
    /// Whether the response clears a caller-supplied acceptance threshold
    pub fn is_accepted(&self, threshold: u8) -> bool {
        !self.is_fallback && self.confidence > threshold
    }
}
