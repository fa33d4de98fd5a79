//! Counting engine: range generation, text frequencies, custom item tallies,
//! and the in-memory log of completed operations.

pub mod report;
mod tally;

use shared::{
    domain::{CountMode, CountResult, ItemCounts, OperationRecord, TextFrequencies},
    error::CountError,
    request::CountRequest,
};
use tracing::{debug, info};

pub use shared;

pub const RANGE_LABEL: &str = "Basic Count";
pub const TEXT_LABEL: &str = "Count Occurrences";
pub const ITEMS_LABEL: &str = "Custom Count";

const TEXT_PREVIEW_CHARS: usize = 20;

/// Owns the operation log and the most recent result.
///
/// Every operation is synchronous; a failed call leaves the log untouched.
#[derive(Debug, Default)]
pub struct CountingEngine {
    mode: CountMode,
    log: Vec<OperationRecord>,
    last_result: Option<CountResult>,
}

impl CountingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CountMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CountMode) {
        self.mode = mode;
    }

    /// Integers from `start` to `end` inclusive, advancing by `step`.
    ///
    /// `start == end` yields `[start]` and a step pointing away from `end`
    /// yields an empty sequence; neither is logged.
    pub fn generate_range(
        &mut self,
        start: i64,
        end: i64,
        step: i64,
    ) -> Result<Vec<i64>, CountError> {
        if step == 0 {
            return Err(CountError::invalid_argument("Step cannot be zero"));
        }
        if start == end {
            return Ok(vec![start]);
        }
        if (start < end && step < 0) || (start > end && step > 0) {
            debug!(start, end, step, "count: range direction mismatch");
            return Ok(Vec::new());
        }

        let values = tally::inclusive_walk(start, end, step);
        debug!(start, end, step, len = values.len(), "count: range generated");
        self.record(
            RANGE_LABEL,
            format!("from {start} to {end} by {step}"),
            CountResult::Range(values.clone()),
        );
        Ok(values)
    }

    pub fn count_text_frequencies(&mut self, text: &str, case_sensitive: bool) -> TextFrequencies {
        let analyzed = if case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        };

        let frequencies = tally::text_frequencies(&analyzed);
        debug!(
            case_sensitive,
            distinct_chars = frequencies.characters.len(),
            distinct_words = frequencies.words.len(),
            "count: text frequencies tallied"
        );
        self.record(
            TEXT_LABEL,
            format!("Text: '{}...'", tally::preview(&analyzed, TEXT_PREVIEW_CHARS)),
            CountResult::Text(frequencies.clone()),
        );
        frequencies
    }

    pub fn count_custom_items<S: AsRef<str>>(&mut self, items: &[S]) -> ItemCounts {
        let counts = tally::tally_items(items);
        debug!(
            items = items.len(),
            distinct = counts.len(),
            "count: custom items tallied"
        );
        self.record(
            ITEMS_LABEL,
            format!("{} items", items.len()),
            CountResult::Items(counts.clone()),
        );
        counts
    }

    /// Runs a parsed front-end request and switches the mode selector to match.
    pub fn execute(&mut self, request: &CountRequest) -> Result<CountResult, CountError> {
        self.mode = request.mode();
        match request {
            CountRequest::Range { start, end, step } => self
                .generate_range(*start, *end, *step)
                .map(CountResult::Range),
            CountRequest::Text {
                text,
                case_sensitive,
            } => Ok(CountResult::Text(
                self.count_text_frequencies(text, *case_sensitive),
            )),
            CountRequest::Items { items } => {
                Ok(CountResult::Items(self.count_custom_items(items.as_slice())))
            }
        }
    }

    /// Completed operations in the order they ran.
    pub fn log(&self) -> &[OperationRecord] {
        &self.log
    }

    pub fn last_result(&self) -> Option<&CountResult> {
        self.last_result.as_ref()
    }

    pub fn clear_log(&mut self) {
        info!(cleared = self.log.len(), "count: operation log cleared");
        self.log.clear();
        self.last_result = None;
    }

    fn record(&mut self, label: &str, description: String, result: CountResult) {
        self.last_result = Some(result.clone());
        self.log.push(OperationRecord::new(label, description, result));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
