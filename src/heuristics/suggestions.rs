use std::collections::BTreeSet;

use crate::models::ZoneId;

use super::lexicon::Lexicon;

/// Build the ordered, deduplicated suggestion list for a detection.
///
/// Rules, in order: no zones; zones without a warm-up; high-intensity work
/// without a cool-down; no distance; no stroke.
pub fn build_suggestions(
    zones: &BTreeSet<ZoneId>,
    has_distance: bool,
    has_stroke: bool,
    lexicon: &Lexicon,
) -> Vec<String> {
    let text = &lexicon.suggestions;
    let has_z1 = zones.contains(&ZoneId::Z1);
    let has_high_intensity = [ZoneId::Z3, ZoneId::Z4, ZoneId::Z5]
        .iter()
        .any(|z| zones.contains(z));

    let rules = [
        (zones.is_empty(), text.add_zones),
        (!zones.is_empty() && !has_z1, text.add_warm_up),
        (!has_z1 && has_high_intensity, text.add_cool_down),
        (!has_distance, text.add_distance),
        (!has_stroke, text.add_stroke),
    ];

    let mut suggestions: Vec<String> = Vec::new();
    for (applies, message) in rules {
        if applies && !suggestions.iter().any(|s| s == message) {
            suggestions.push(message.to_string());
        }
    }
    suggestions
}
