//! Human-readable rendering of counting results, shared by the GUI result
//! panel and the CLI.

use std::fmt::Write as _;

use shared::{
    domain::{CountResult, ItemCounts, OperationRecord, TextFrequencies},
    request::CountRequest,
};

/// Renders `result` together with the request that produced it.
pub fn render_report(request: &CountRequest, result: &CountResult) -> String {
    match (request, result) {
        (CountRequest::Range { start, end, step }, CountResult::Range(values)) => {
            render_range(*start, *end, *step, values)
        }
        (CountRequest::Text { text, .. }, CountResult::Text(frequencies)) => {
            render_text(text, frequencies)
        }
        (CountRequest::Items { items }, CountResult::Items(counts)) => {
            render_items(items, counts)
        }
        (_, other) => render_result(other),
    }
}

pub fn render_range(start: i64, end: i64, step: i64, values: &[i64]) -> String {
    format!("Counting from {start} to {end} by {step}:\n{values:?}")
}

pub fn render_text(text: &str, frequencies: &TextFrequencies) -> String {
    let mut out = format!("Text analyzed: \"{text}\"\n\n");
    push_frequencies(&mut out, frequencies);
    out
}

pub fn render_items(items: &[String], counts: &ItemCounts) -> String {
    let quoted = items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = format!("Items analyzed: [{quoted}]\n\n");
    push_item_counts(&mut out, counts);
    out
}

/// Renders a result without its originating request, e.g. a log entry.
pub fn render_result(result: &CountResult) -> String {
    match result {
        CountResult::Range(values) => format!("{values:?}"),
        CountResult::Text(frequencies) => {
            let mut out = String::new();
            push_frequencies(&mut out, frequencies);
            out
        }
        CountResult::Items(counts) => {
            let mut out = String::new();
            push_item_counts(&mut out, counts);
            out
        }
    }
}

fn push_frequencies(out: &mut String, frequencies: &TextFrequencies) {
    out.push_str("Character counts:\n");
    for (ch, count) in &frequencies.characters {
        let _ = writeln!(out, "  '{}': {count}", ch.escape_debug());
    }
    out.push_str("\nWord counts:\n");
    for (word, count) in &frequencies.words {
        let _ = writeln!(out, "  '{word}': {count}");
    }
}

fn push_item_counts(out: &mut String, counts: &ItemCounts) {
    out.push_str("Count results:\n");
    for (item, count) in counts {
        let _ = writeln!(out, "  '{item}': {count}");
    }
}

pub fn history_lines(log: &[OperationRecord]) -> Vec<String> {
    log.iter()
        .enumerate()
        .map(|(idx, record)| record.history_line(idx + 1))
        .collect()
}
