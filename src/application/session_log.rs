//! Session log: Append-only record of completed predictions.

use std::collections::VecDeque;

use crate::domain::{LogEntry, PredictionResult};

/// Completed predictions for the current session, newest first.
///
/// Entries are numbered 1, 2, 3, … in the order responses arrive. The log
/// lives only as long as the process.
#[derive(Debug, Default)]
pub struct SessionLog {
    entries: VecDeque<LogEntry>,
}

impl SessionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result and return the new entry.
    pub fn append(&mut self, result: PredictionResult) -> LogEntry {
        let entry = LogEntry::new(self.entries.len() as u64 + 1, result);
        self.entries.push_front(entry.clone());
        entry
    }

    /// Entries most-recent-first, for the log table.
    pub fn table_rows(&self) -> impl ExactSizeIterator<Item = &LogEntry> + DoubleEndedIterator {
        self.entries.iter()
    }

    /// `(sequence_id, probability)` oldest-first, for the trend chart.
    ///
    /// Reads left to right in time, so this is the table order reversed.
    #[must_use]
    pub fn chart_series(&self) -> Vec<(u64, f64)> {
        self.entries
            .iter()
            .rev()
            .map(|entry| (entry.sequence_id, entry.probability))
            .collect()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
