use serde_json::{Map, Value};

use crate::heuristics::Language;
use crate::models::{RemoteClassificationResponse, ZoneId, ZoneVolumeMap};

use super::RemoteError;

/// Find the first well-formed JSON object embedded in free text.
///
/// Each `{` is tried in turn as the start of an object, so commentary or
/// code fences around the object are ignored, as are earlier broken
/// fragments.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(map))) => Some(map),
            _ => None,
        }
    })
}

fn zone_key(zone: ZoneId) -> &'static str {
    match zone {
        ZoneId::Z1 => "z1",
        ZoneId::Z2 => "z2",
        ZoneId::Z3 => "z3",
        ZoneId::Z4 => "z4",
        ZoneId::Z5 => "z5",
    }
}

fn read_meters(object: &Map<String, Value>, key: &str) -> Result<u32, RemoteError> {
    let value = match object.get(key) {
        None | Some(Value::Null) => return Ok(0),
        Some(value) => value,
    };

    let meters = value
        .as_f64()
        .ok_or_else(|| RemoteError::Malformed(format!("{} is not numeric: {}", key, value)))?;
    if !meters.is_finite() || meters < 0.0 {
        return Err(RemoteError::Malformed(format!("{} is negative: {}", key, meters)));
    }

    Ok(meters.round().min(f64::from(u32::MAX)) as u32)
}

/// Validate a raw reply and turn it into a trusted response.
///
/// Missing zone keys read as 0; non-numeric zones or confidence, an empty
/// rationale, or non-string suggestions reject the whole reply.
pub fn validate_reply(text: &str) -> Result<RemoteClassificationResponse, RemoteError> {
    let object = extract_json_object(text).ok_or(RemoteError::NoJsonObject)?;

    let mut volumes = ZoneVolumeMap::default();
    for zone in ZoneId::ALL {
        volumes.set(zone, read_meters(&object, zone_key(zone))?);
    }

    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .filter(|c| c.is_finite())
        .ok_or_else(|| RemoteError::Malformed("confidence missing or not numeric".to_string()))?;

    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| RemoteError::Malformed("reasoning missing or empty".to_string()))?;

    let suggestions = match object.get("suggestions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    RemoteError::Malformed(format!("suggestion is not a string: {}", item))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(RemoteError::Malformed(format!("suggestions is not a list: {}", other)));
        }
    };

    Ok(RemoteClassificationResponse {
        volumes,
        confidence: confidence.round().clamp(0.0, 100.0) as u8,
        reasoning: reasoning.to_string(),
        suggestions,
        is_fallback: false,
    })
}

/// Fixed response used whenever the remote classifier cannot be trusted
pub fn fallback_response(language: Language) -> RemoteClassificationResponse {
    let text = &language.lexicon().fallback;
    RemoteClassificationResponse {
        volumes: ZoneVolumeMap::default(),
        confidence: 0,
        reasoning: text.reasoning.to_string(),
        suggestions: text.suggestions.iter().map(|s| s.to_string()).collect(),
        is_fallback: true,
    }
}
