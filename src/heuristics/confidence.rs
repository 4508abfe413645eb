/// Weight for detecting at least one zone
pub const ZONE_WEIGHT: u8 = 30;
/// Weight for extracting a non-zero distance
pub const DISTANCE_WEIGHT: u8 = 25;
/// Weight for naming at least one stroke
pub const STROKE_WEIGHT: u8 = 20;
/// Weight for at least one intensity word
pub const INTENSITY_WEIGHT: u8 = 15;
/// Weight for a description longer than `DETAILED_TEXT_CHARS`
pub const DETAIL_WEIGHT: u8 = 10;
/// Character count above which a description counts as detailed
pub const DETAILED_TEXT_CHARS: usize = 100;

/// Raw signals the confidence score is derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfidenceSignals {
    pub zone_detected: bool,
    pub has_distance: bool,
    pub stroke_detected: bool,
    pub intensity_detected: bool,
    /// Length of the trimmed input, in characters
    pub text_chars: usize,
}

/// Deterministic rule-weighted confidence in [0, 100]
pub fn score_confidence(signals: &ConfidenceSignals) -> u8 {
    let weights = [
        (signals.zone_detected, ZONE_WEIGHT),
        (signals.has_distance, DISTANCE_WEIGHT),
        (signals.stroke_detected, STROKE_WEIGHT),
        (signals.intensity_detected, INTENSITY_WEIGHT),
        (signals.text_chars > DETAILED_TEXT_CHARS, DETAIL_WEIGHT),
    ];

    let total: u32 = weights
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, weight)| u32::from(*weight))
        .sum();

    total.min(100) as u8
}
