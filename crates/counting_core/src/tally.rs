//! Pure counting primitives. Nothing here touches the operation log.

use std::sync::OnceLock;

use regex::Regex;
use shared::domain::{ItemCounts, TextFrequencies};

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\w+").expect("word pattern is a valid regex"))
}

/// Walks from `start` towards `end` by `step`, keeping every value that has
/// not passed `end`. `step` must be non-zero and point towards `end`.
pub(crate) fn inclusive_walk(start: i64, end: i64, step: i64) -> Vec<i64> {
    let mut values = Vec::new();
    let mut current = Some(start);
    while let Some(value) = current {
        let passed_end = if step > 0 { value > end } else { value < end };
        if passed_end {
            break;
        }
        values.push(value);
        current = value.checked_add(step);
    }
    values
}

/// Character and word tallies of `text` as given; case folding is the
/// caller's concern.
pub(crate) fn text_frequencies(text: &str) -> TextFrequencies {
    let mut frequencies = TextFrequencies::default();

    for word in word_pattern().find_iter(text) {
        *frequencies
            .words
            .entry(word.as_str().to_string())
            .or_insert(0) += 1;
    }

    for ch in text.chars().filter(|ch| *ch != ' ') {
        *frequencies.characters.entry(ch).or_insert(0) += 1;
    }

    frequencies
}

pub(crate) fn tally_items<S: AsRef<str>>(items: &[S]) -> ItemCounts {
    let mut counts = ItemCounts::new();
    for item in items {
        *counts.entry(item.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_keeps_values_up_to_end_only() {
        assert_eq!(inclusive_walk(1, 10, 3), vec![1, 4, 7, 10]);
        assert_eq!(inclusive_walk(1, 10, 4), vec![1, 5, 9]);
        assert_eq!(inclusive_walk(0, -6, -3), vec![0, -3, -6]);
    }

    #[test]
    fn walk_stops_instead_of_overflowing() {
        assert_eq!(
            inclusive_walk(i64::MAX - 2, i64::MAX, 2),
            vec![i64::MAX - 2, i64::MAX]
        );
        assert_eq!(inclusive_walk(i64::MIN + 1, i64::MIN, -5), vec![i64::MIN + 1]);
    }

    #[test]
    fn words_are_runs_of_word_characters() {
        let frequencies = text_frequencies("snake_case, x2 -- x2!");
        assert_eq!(frequencies.words.get("snake_case"), Some(&1));
        assert_eq!(frequencies.words.get("x2"), Some(&2));
        assert_eq!(frequencies.words.len(), 2);
    }

    #[test]
    fn characters_skip_plain_spaces_but_keep_other_whitespace() {
        let frequencies = text_frequencies("a b\tb!");
        assert_eq!(frequencies.characters.get(&'a'), Some(&1));
        assert_eq!(frequencies.characters.get(&'b'), Some(&2));
        assert_eq!(frequencies.characters.get(&'\t'), Some(&1));
        assert_eq!(frequencies.characters.get(&'!'), Some(&1));
        assert_eq!(frequencies.characters.get(&' '), None);
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo wörld", 4), "héll");
        assert_eq!(preview("short", 20), "short");
    }
}
