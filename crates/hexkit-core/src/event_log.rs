//! Append-only status log.
//!
//! Keeps the ordered history of status events for display in the
//! status monitor. Entries are timestamped on append and returned
//! oldest first.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::events::StatusEvent;

/// A single timestamped entry in the status log
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// When the event was appended.
    pub timestamp: DateTime<Local>,
    /// The event itself.
    pub event: StatusEvent,
}

impl LogEntry {
    fn new(event: StatusEvent) -> Self {
        Self {
            timestamp: Local::now(),
            event,
        }
    }

    /// Render the entry as a status monitor line
    pub fn render(&self) -> String {
        format!(
            "{} {}",
            self.timestamp.format("%H:%M:%S"),
            self.event.description()
        )
    }
}

/// Append-only event log with a bounded history
///
/// The session appends one entry per status event; the presentation
/// layer reads them back in insertion order. History is capped so a
/// long-running session cannot grow without bound.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
}

impl EventLog {
    /// Default maximum number of retained entries
    pub const DEFAULT_MAX_ENTRIES: usize = 1000;

    /// Create a log with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Create a log retaining at most `max_entries` entries
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Append an event, timestamping it now
    ///
    /// Oldest entries are dropped once the cap is reached.
    pub fn append(&mut self, event: StatusEvent) {
        tracing::debug!("status: {}", event.description());
        self.entries.push_back(LogEntry::new(event));
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The most recent entry, if any
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
