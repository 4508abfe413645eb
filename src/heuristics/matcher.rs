use std::collections::BTreeSet;

use super::lexicon::LabelTriggers;

/// Lowercase the text and collapse runs of whitespace to single spaces
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Count non-overlapping whole-word occurrences of `phrase` in `text`.
///
/// Both inputs must already be normalized. A match only counts when the
/// characters on either side are not letters, digits or underscores, so
/// "base" never matches inside "database".
pub fn count_phrase(text: &str, phrase: &str) -> u32 {
    let Some(first) = phrase.chars().next() else {
        return 0;
    };

    let mut count = 0;
    let mut from = 0;

    while let Some(pos) = text[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();

        let clear_before = text[..start].chars().next_back().is_none_or(|c| !is_word_char(c));
        let clear_after = text[end..].chars().next().is_none_or(|c| !is_word_char(c));

        if clear_before && clear_after {
            count += 1;
            from = end;
        } else {
            from = start + first.len_utf8();
        }
    }

    count
}

/// Total whole-word hits for any of the phrases
pub fn count_any(text: &str, phrases: &[&str]) -> u32 {
    phrases.iter().map(|p| count_phrase(text, p)).sum()
}

/// Canonical labels with at least one matching trigger
pub fn detect_labels(text: &str, table: &[LabelTriggers]) -> BTreeSet<String> {
    table
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| count_phrase(text, t) > 0))
        .map(|(label, _)| label.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Warm   UP\n400m "), "warm up 400m");
    }

    #[test]
    fn test_whole_word_only() {
        assert_eq!(count_phrase("database work", "base"), 0);
        assert_eq!(count_phrase("aerobic base, base again", "base"), 2);
        assert_eq!(count_phrase("vo2max set", "vo2"), 0);
        assert_eq!(count_phrase("zone 10", "zone 1"), 0);
    }

    #[test]
    fn test_punctuation_counts_as_boundary() {
        assert_eq!(count_phrase("10x200m @z2 aerobic", "z2"), 1);
        assert_eq!(count_phrase("(warm-up)", "warm-up"), 1);
    }

    #[test]
    fn test_multi_word_and_accented_phrases() {
        assert_eq!(count_phrase("200 vuelta a la calma", "vuelta a la calma"), 1);
        assert_eq!(count_phrase("serie de recuperación", "recuperación"), 1);
        assert_eq!(count_phrase("serie de recuperaciónes", "recuperación"), 0);
    }

    #[test]
    fn test_detect_labels_is_a_set() {
        let table: &[LabelTriggers] = &[
            ("freestyle", &["free", "freestyle"]),
            ("butterfly", &["fly"]),
        ];
        let labels = detect_labels("free, freestyle, free", table);

        assert_eq!(labels.len(), 1);
        assert!(labels.contains("freestyle"));
    }
}
