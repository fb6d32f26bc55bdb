//! Bounded execution log.
//!
//! An append-only ring of timestamped messages for display layers. The
//! decoder/executor never reads it. Oldest entries are evicted first once
//! the configured capacity is reached.

use std::collections::VecDeque;
use std::time::Instant;

use serde::Serialize;

/// Severity tag of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LogLevel {
    /// Routine progress (no-op steps, resets).
    Info,
    /// A successfully executed instruction or load.
    Success,
    /// A failed step or load.
    Error,
}

/// One timestamped log entry.
#[derive(Clone, Debug, Serialize)]
pub struct LogEntry {
    /// Milliseconds since the simulator was created.
    pub elapsed_ms: u64,
    /// Severity tag.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
}

/// Capacity-bounded FIFO execution log.
#[derive(Debug)]
pub struct ExecutionLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    started: Instant,
}

impl ExecutionLog {
    /// Creates an empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            started: Instant::now(),
        }
    }

    /// Appends an entry, evicting the oldest if at capacity.
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            elapsed_ms: self.started.elapsed().as_millis() as u64,
            level,
            message: message.into(),
        });
    }

    /// The entries in order, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discards all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
