//! Session state shared by every round

use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// State of one interactive session.
///
/// Owned by the caller and passed by reference through each round, so the
/// round pipeline can be exercised in isolation.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Every label processed so far, in first-seen order
    seen: Vec<String>,
    seen_index: HashSet<String>,
    /// Confirmed-available domains across all rounds
    available: Vec<String>,
    /// Completed rounds
    rounds: usize,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    /// Create a new, empty session state
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            seen: Vec::new(),
            seen_index: HashSet::new(),
            available: Vec::new(),
            rounds: 0,
            started_at: now,
            updated_at: now,
        }
    }

    /// Record a label as processed; returns `false` when it was already seen
    pub fn mark_seen(&mut self, label: &str) -> bool {
        if self.seen_index.contains(label) {
            return false;
        }
        self.seen_index.insert(label.to_string());
        self.seen.push(label.to_string());
        self.updated_at = Utc::now();
        true
    }

    pub fn has_seen(&self, label: &str) -> bool {
        self.seen_index.contains(label)
    }

    /// Labels processed so far, in first-seen order
    pub fn seen(&self) -> &[String] {
        &self.seen
    }

    /// Add the available domains of a finished round
    pub fn add_available(&mut self, domains: &[String]) {
        self.available.extend_from_slice(domains);
        self.updated_at = Utc::now();
    }

    /// Confirmed-available domains of the whole session
    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Start a new round and return its 1-based number
    pub fn begin_round(&mut self) -> usize {
        self.rounds += 1;
        self.updated_at = Utc::now();
        self.rounds
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
