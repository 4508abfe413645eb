use std::sync::LazyLock;

use regex::Regex;

/// `<repeats>x<number><unit>` with the repeat prefix optional.
///
/// Longer unit spellings come first so the alternation prefers "mts" over
/// "m". Only `.` is a decimal separator.
static DISTANCE_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:([0-9]+)\s*[x×]\s*)?([0-9]+(?:\.[0-9]+)?)\s*(kilómetros|kilometros|kilometres|kilometers|kilómetro|kilometro|kilometre|kilometer|kms|km|k|metros|metres|meters|metro|metre|meter|mts|mt|m)\b",
    )
    .ok()
});

/// One distance-bearing token found in text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceToken {
    /// Repeat count from `NxD` notation (1 when absent)
    pub repeats: u32,
    /// Distance of a single repeat in meters
    pub meters: f64,
}

impl DistanceToken {
    /// Contribution to the total under the given repeat policy
    pub fn total_meters(&self, expand_repeats: bool) -> f64 {
        if expand_repeats {
            self.meters * f64::from(self.repeats)
        } else {
            self.meters
        }
    }
}

fn unit_factor(unit: &str) -> f64 {
    if unit.starts_with('k') {
        1000.0
    } else {
        1.0
    }
}

/// All distance tokens in the text; tokens without a known unit are skipped
pub fn distance_tokens(text: &str) -> Vec<DistanceToken> {
    let Some(pattern) = DISTANCE_TOKEN.as_ref() else {
        return Vec::new();
    };

    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            // an unreadable repeat count still leaves a valid distance
            let repeats = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or(1);
            let value: f64 = caps.get(2)?.as_str().parse().ok()?;
            let unit = caps.get(3)?.as_str().to_lowercase();

            Some(DistanceToken {
                repeats,
                meters: value * unit_factor(&unit),
            })
        })
        .collect()
}

/// Sum of all distance tokens in meters, rounded to the nearest meter
pub fn extract_distance(text: &str, expand_repeats: bool) -> u32 {
    let total: f64 = distance_tokens(text)
        .iter()
        .map(|t| t.total_meters(expand_repeats))
        .sum();

    total.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_compiles() {
        assert!(DISTANCE_TOKEN.is_some());
    }

    #[test]
    fn test_plain_meters_and_kilometers() {
        assert_eq!(extract_distance("400m easy then 1.5km steady", true), 1900);
        assert_eq!(extract_distance("200 meters, 2 kms", true), 2200);
        assert_eq!(extract_distance("3k pull", true), 3000);
    }

    #[test]
    fn test_repeat_notation_expanded() {
        assert_eq!(extract_distance("10x200m", true), 2000);
        assert_eq!(extract_distance("8 x 50 m", true), 400);
        assert_eq!(extract_distance("4×100mts", true), 400);
    }

    #[test]
    fn test_repeat_notation_not_expanded() {
        assert_eq!(extract_distance("10x200m", false), 200);
        assert_eq!(extract_distance("10x200m, 4x50m", false), 250);
    }

    #[test]
    fn test_tokens_without_unit_are_ignored() {
        assert!(distance_tokens("10x200 on 3:00, rest 20").is_empty());
        assert_eq!(extract_distance("3 min rest, 100m", true), 100);
        assert_eq!(extract_distance("5 kick", true), 0);
    }

    #[test]
    fn test_oversized_repeat_count_keeps_distance() {
        assert_eq!(extract_distance("99999999999x100m", true), 100);
        assert_eq!(extract_distance("99999999999x100m", false), 100);
    }

    #[test]
    fn test_spanish_units() {
        assert_eq!(extract_distance("6x100 metros y 1 kilómetro", true), 1600);
    }

    #[test]
    fn test_comma_is_not_a_decimal_separator() {
        assert_eq!(extract_distance("1,500m", true), 500);
    }
}
