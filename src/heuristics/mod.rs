pub mod confidence;
pub mod distance;
pub mod effort;
pub mod lexicon;
pub mod matcher;
pub mod suggestions;

pub use confidence::*;
pub use distance::*;
pub use effort::*;
pub use lexicon::*;
pub use matcher::*;
pub use suggestions::*;

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::{DetectionRecord, ZoneHits, ZoneId, ZoneVolumeMap};

/// Configuration for heuristic text classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicsConfig {
    /// Language pack used for triggers and messages
    pub language: Language,
    /// Whether `10x200m` counts as 2000m (true) or 200m (false)
    pub expand_repeats: bool,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            expand_repeats: true,
        }
    }
}

/// Classify a free-text workout description.
///
/// Pure function of the text, the configuration and the static lexicon:
/// 1. Count whole-word zone triggers per zone
/// 2. Collect distinct stroke and intensity labels
/// 3. Sum distance tokens and split them across zones by hit proportion
/// 4. Derive suggestions and the confidence score
pub fn classify_text(text: &str, config: &HeuristicsConfig) -> DetectionRecord {
    let lexicon = config.language.lexicon();
    let normalized = normalize_text(text);

    let mut zone_hits = ZoneHits::default();
    for zone in ZoneId::ALL {
        zone_hits.add(zone, count_any(&normalized, lexicon.zone_triggers(zone)));
    }
    let zones: BTreeSet<ZoneId> = zone_hits.detected().collect();

    let strokes = detect_labels(&normalized, lexicon.strokes);
    let intensities = detect_labels(&normalized, lexicon.intensities);
    let distance_m = extract_distance(&normalized, config.expand_repeats);
    let volumes = split_volumes(&zone_hits, distance_m);

    let suggestions = build_suggestions(&zones, distance_m > 0, !strokes.is_empty(), lexicon);
    let confidence = score_confidence(&ConfidenceSignals {
        zone_detected: !zones.is_empty(),
        has_distance: distance_m > 0,
        stroke_detected: !strokes.is_empty(),
        intensity_detected: !intensities.is_empty(),
        text_chars: text.trim().chars().count(),
    });

    debug!(
        "Classified text: zones={:?}, distance={}m, strokes={}, intensities={}, confidence={}",
        zones,
        distance_m,
        strokes.len(),
        intensities.len(),
        confidence
    );

    DetectionRecord {
        zones,
        zone_hits,
        strokes,
        intensities,
        distance_m,
        volumes,
        suggestions,
        confidence,
    }
}

/// Split a distance across zones in proportion to their hit counts.
///
/// Each zone is rounded to the nearest meter, so the parts may differ from
/// the whole by a few meters. With no hits or no distance every zone is 0.
pub fn split_volumes(hits: &ZoneHits, distance_m: u32) -> ZoneVolumeMap {
    let total_hits = hits.total();
    let mut volumes = ZoneVolumeMap::default();

    if total_hits == 0 || distance_m == 0 {
        return volumes;
    }

    for zone in hits.detected() {
        let share = f64::from(distance_m) * f64::from(hits.get(zone)) / f64::from(total_hits);
        volumes.set(zone, share.round() as u32);
    }
    volumes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> DetectionRecord {
        classify_text(text, &HeuristicsConfig::default())
    }

    fn labels(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_repeat_example_with_expansion() {
        let record = classify("10x200m @Z2 aerobic base, 4x50m Z4 sprint");

        assert_eq!(record.zones, BTreeSet::from([ZoneId::Z2, ZoneId::Z4]));
        assert_eq!(record.zone_hits.get(ZoneId::Z2), 3);
        assert_eq!(record.zone_hits.get(ZoneId::Z4), 1);
        assert_eq!(record.distance_m, 2200);
        assert_eq!(record.volumes.z2, 1650);
        assert_eq!(record.volumes.z4, 550);
        assert!(record.strokes.is_empty());
        assert!(record.intensities.contains("sprint"));
        // zone + distance + intensity, no stroke
        assert_eq!(record.confidence, 70);
    }

    #[test]
    fn test_repeat_example_without_expansion() {
        let config = HeuristicsConfig {
            expand_repeats: false,
            ..Default::default()
        };
        let record = classify_text("10x200m @Z2 aerobic base, 4x50m Z4 sprint", &config);

        assert_eq!(record.distance_m, 250);
        assert_eq!(record.volumes.z2, 188);
        assert_eq!(record.volumes.z4, 63);
        assert_eq!(record.confidence, 70);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   \n\t "] {
            let record = classify(text);
            let text_suggestions = &ENGLISH.suggestions;

            assert_eq!(record.confidence, 0);
            assert!(record.zones.is_empty());
            assert_eq!(record.zone_hits.total(), 0);
            assert!(record.strokes.is_empty());
            assert!(record.intensities.is_empty());
            assert!(record.volumes.is_zero());
            assert_eq!(
                record.suggestions,
                vec![
                    text_suggestions.add_zones.to_string(),
                    text_suggestions.add_distance.to_string(),
                    text_suggestions.add_stroke.to_string(),
                ]
            );
        }
    }

    #[test]
    fn test_detailed_session() {
        let text = "Warm up 400m easy freestyle, main set 8x100m threshold fast on 1:40, \
                    then 200m cool down backstroke. Focus on long strokes and steady breathing.";
        let record = classify(text);

        assert_eq!(record.zone_hits.get(ZoneId::Z1), 3);
        assert_eq!(record.zone_hits.get(ZoneId::Z2), 1);
        assert_eq!(record.zone_hits.get(ZoneId::Z4), 1);
        assert_eq!(record.distance_m, 1400);
        assert_eq!(record.volumes.z1, 840);
        assert_eq!(record.volumes.z2, 280);
        assert_eq!(record.volumes.z4, 280);
        assert_eq!(record.strokes, labels(&["backstroke", "freestyle"]));
        assert_eq!(record.intensities, labels(&["easy", "fast", "moderate"]));
        assert_eq!(record.confidence, 100);
        assert!(record.suggestions.is_empty());
    }

    #[test]
    fn test_zone_counts_but_stroke_sets() {
        let record = classify("200m free Z2, 200m free Z2, 200m free Z2, 200m fly Z4");

        // every zone mention counts towards the split
        assert_eq!(record.zone_hits.get(ZoneId::Z2), 3);
        assert_eq!(record.volumes.z2, 600);
        assert_eq!(record.volumes.z4, 200);
        // repeated strokes collapse to one label each
        assert_eq!(record.strokes.len(), 2);
    }

    #[test]
    fn test_no_zone_keywords_caps_confidence() {
        let texts = [
            "4x100m freestyle fast",
            "database review, 500m",
            "long detailed description of a swim with 3km of freestyle and backstroke that is done quickly and strong",
        ];

        for text in texts {
            let record = classify(text);
            assert!(record.zones.is_empty(), "{}", text);
            assert!(record.confidence <= 70, "{}", text);
            assert!(record.volumes.is_zero(), "{}", text);
        }
    }

    #[test]
    fn test_volumes_sum_to_zero_or_distance() {
        let texts = [
            "10x200m @Z2 aerobic base, 4x50m Z4 sprint",
            "300m easy, 3x333m tempo, 100m max, 7x77m threshold",
            "1.5km steady z2 with 3 x 50m all out",
            "z1 z2 z3 z4 z5 1000m",
            "z3 without distance",
            "",
        ];

        for text in texts {
            let record = classify(text);
            let total = record.volumes.total() as i64;
            let distance = i64::from(record.distance_m);
            assert!(
                total == 0 || (total - distance).abs() <= 2,
                "{}: total {} vs distance {}",
                text,
                total,
                distance
            );
        }
    }

    #[test]
    fn test_spanish_language_pack() {
        let config = HeuristicsConfig {
            language: Language::Spanish,
            ..Default::default()
        };
        let record = classify_text("Calentamiento 400m suave, 6x100m umbral mariposa", &config);

        assert_eq!(record.zone_hits.get(ZoneId::Z1), 2);
        assert_eq!(record.zone_hits.get(ZoneId::Z4), 1);
        assert_eq!(record.distance_m, 1000);
        assert_eq!(record.volumes.z1, 667);
        assert_eq!(record.volumes.z4, 333);
        assert!(record.strokes.contains("butterfly"));
        assert!(record.intensities.contains("easy"));
        assert_eq!(record.confidence, 90);
        assert!(record.suggestions.is_empty());
    }

    #[test]
    fn test_split_volumes_without_hits() {
        assert!(split_volumes(&ZoneHits::default(), 1000).is_zero());
    }
}
