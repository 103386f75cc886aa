//! Bounded calculation history, newest entry first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// What a history entry evaluated to.
///
/// Usually a number; a failed division is recorded with the text `"Error"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryResult {
    Number(f64),
    Text(String),
}

impl HistoryResult {
    /// Numeric value, if the entry has one.
    pub fn value(&self) -> Option<f64> {
        match self {
            HistoryResult::Number(value) => Some(*value),
            HistoryResult::Text(_) => None,
        }
    }
}

impl fmt::Display for HistoryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryResult::Number(value) => write!(f, "{}", value),
            HistoryResult::Text(text) => f.write_str(text),
        }
    }
}

/// A completed computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Expression as shown to the user, e.g. `"5 + 3"` or `"√(16)"`.
    pub expression: String,

    pub result: HistoryResult,

    /// When the computation completed.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(expression: impl Into<String>, result: HistoryResult) -> Self {
        Self::with_timestamp(expression, result, Utc::now())
    }

    /// Creates an entry with a specific timestamp.
    pub fn with_timestamp(
        expression: impl Into<String>,
        result: HistoryResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        HistoryEntry {
            expression: expression.into(),
            result,
            timestamp,
        }
    }
}

/// Calculation history.
///
/// Holds at most [`History::CAPACITY`] entries. New entries go to the front;
/// once full, the oldest entry at the back is evicted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Maximum number of retained entries.
    pub const CAPACITY: usize = 10;

    /// Creates an empty history.
    pub fn new() -> Self {
        History {
            entries: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Adds an entry as the newest one, evicting the oldest if full.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(Self::CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entry at `index`, where 0 is the newest.
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Serializes the history as a JSON array, newest first.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Restores a history saved by [`History::to_json`].
    ///
    /// Entries beyond the capacity are dropped from the old end.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut entries: VecDeque<HistoryEntry> = serde_json::from_str(json)?;
        entries.truncate(Self::CAPACITY);
        Ok(History { entries })
    }
}
