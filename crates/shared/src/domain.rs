use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CountError;

pub type CharCounts = BTreeMap<char, usize>;
pub type WordCounts = BTreeMap<String, usize>;
pub type ItemCounts = BTreeMap<String, usize>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    #[default]
    #[serde(alias = "range")]
    Basic,
    #[serde(alias = "text")]
    Occurrences,
    #[serde(alias = "items")]
    Custom,
}

impl CountMode {
    pub const ALL: [CountMode; 3] = [Self::Basic, Self::Occurrences, Self::Custom];

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic Count",
            Self::Occurrences => "Count Occurrences",
            Self::Custom => "Custom List Count",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Occurrences => "occurrences",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountMode {
    type Err = CountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "basic" | "range" => Ok(Self::Basic),
            "occurrences" | "text" => Ok(Self::Occurrences),
            "custom" | "items" => Ok(Self::Custom),
            _ => Err(CountError::validation(format!("unknown counting mode '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFrequencies {
    pub characters: CharCounts,
    pub words: WordCounts,
}

/// Result of one counting operation, tagged by the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CountResult {
    Range(Vec<i64>),
    Text(TextFrequencies),
    Items(ItemCounts),
}

impl CountResult {
    pub fn mode(&self) -> CountMode {
        match self {
            Self::Range(_) => CountMode::Basic,
            Self::Text(_) => CountMode::Occurrences,
            Self::Items(_) => CountMode::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub label: String,
    pub description: String,
    pub result: CountResult,
    pub recorded_at: DateTime<Utc>,
}

impl OperationRecord {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        result: CountResult,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            result,
            recorded_at: Utc::now(),
        }
    }

    /// One-based history line, e.g. `3. Custom Count - 4 items`.
    pub fn history_line(&self, position: usize) -> String {
        format!("{position}. {} - {}", self.label, self.description)
    }
}
