//! Raw front-end input turned into typed counting requests.
//!
//! The engine trusts its arguments apart from the zero-step check, so every
//! check on user-typed text happens here, before a request reaches it.

use serde::{Deserialize, Serialize};

use crate::{domain::CountMode, error::CountError};

/// Default ceiling on generated range length accepted from a front end.
pub const DEFAULT_MAX_RANGE_LEN: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CountRequest {
    Range {
        start: i64,
        end: i64,
        step: i64,
    },
    Text {
        text: String,
        case_sensitive: bool,
    },
    Items {
        items: Vec<String>,
    },
}

impl CountRequest {
    pub fn range_from_fields(start: &str, end: &str, step: &str) -> Result<Self, CountError> {
        Ok(Self::Range {
            start: parse_whole_number("Start", start)?,
            end: parse_whole_number("End", end)?,
            step: parse_whole_number("Step", step)?,
        })
    }

    pub fn text_from_input(text: &str, case_sensitive: bool) -> Result<Self, CountError> {
        if text.is_empty() {
            return Err(CountError::validation("Please enter text to analyze."));
        }
        Ok(Self::Text {
            text: text.to_string(),
            case_sensitive,
        })
    }

    pub fn items_from_list(raw: &str) -> Result<Self, CountError> {
        if raw.is_empty() {
            return Err(CountError::validation("Please enter items to count."));
        }
        let items = split_item_list(raw);
        if items.is_empty() {
            return Err(CountError::validation(
                "Please enter valid items separated by commas.",
            ));
        }
        Ok(Self::Items { items })
    }

    /// Applies the raw-input checks to a request that arrived already typed,
    /// such as one deserialized from JSON. Items are trimmed and empty ones
    /// dropped, matching `items_from_list`.
    pub fn validate(self) -> Result<Self, CountError> {
        match self {
            Self::Range { .. } => Ok(self),
            Self::Text {
                text,
                case_sensitive,
            } => Self::text_from_input(&text, case_sensitive),
            Self::Items { items } => {
                if items.is_empty() {
                    return Err(CountError::validation("Please enter items to count."));
                }
                let items = items
                    .iter()
                    .map(|item| item.trim())
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                if items.is_empty() {
                    return Err(CountError::validation(
                        "Please enter valid items separated by commas.",
                    ));
                }
                Ok(Self::Items { items })
            }
        }
    }

    pub fn mode(&self) -> CountMode {
        match self {
            Self::Range { .. } => CountMode::Basic,
            Self::Text { .. } => CountMode::Occurrences,
            Self::Items { .. } => CountMode::Custom,
        }
    }

    /// Rejects range requests whose output would exceed `max_range_len` values.
    pub fn ensure_within(&self, max_range_len: usize) -> Result<(), CountError> {
        let Self::Range { start, end, step } = *self else {
            return Ok(());
        };
        match range_len(start, end, step) {
            Some(len) if len > max_range_len as u128 => Err(CountError::validation(format!(
                "Range from {start} to {end} by {step} would produce {len} values \
                 (limit is {max_range_len})"
            ))),
            _ => Ok(()),
        }
    }
}

/// Splits a comma-delimited list, trimming items and dropping empty ones.
pub fn split_item_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of values an inclusive range walk would produce, or `None` for a
/// zero step.
pub fn range_len(start: i64, end: i64, step: i64) -> Option<u128> {
    if step == 0 {
        return None;
    }
    if start == end {
        return Some(1);
    }
    if (start < end) != (step > 0) {
        return Some(0);
    }
    let span = (i128::from(end) - i128::from(start)).unsigned_abs();
    Some(span / i128::from(step).unsigned_abs() + 1)
}

fn parse_whole_number(field: &str, raw: &str) -> Result<i64, CountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CountError::validation(format!(
            "Please enter a value for {field}."
        )));
    }
    trimmed.parse::<i64>().map_err(|err| {
        CountError::validation(format!(
            "Invalid input: {field} '{trimmed}' is not a whole number ({err})"
        ))
    })
}
