//! Per-target result cache with a read-time freshness window.

use std::collections::HashMap;
use std::time::Duration;

use crate::state::QueryResult;

/// Keyed store of the last-fetched result per target.
///
/// An entry is fresh while `fetched_at.elapsed() < window`; staleness is
/// evaluated on every [`get`](Self::get), never proactively expired. A stale
/// entry behaves as absent but is not evicted — the next
/// [`put`](Self::put) overwrites it in place, last-write-wins.
///
/// Single-writer discipline is enforced by the `&mut self` receivers; the
/// sequential [`QueryRunner`](crate::QueryRunner) never interleaves writes.
#[derive(Debug)]
pub struct ResultCache {
    window: Duration,
    entries: HashMap<String, QueryResult>,
}

impl ResultCache {
    /// An empty cache with the given freshness window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: HashMap::new(),
        }
    }

    /// Returns the configured freshness window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns the stored result for `target_id` iff it is still fresh.
    pub fn get(&self, target_id: &str) -> Option<&QueryResult> {
        self.entries
            .get(target_id)
            .filter(|result| result.fetched_at.elapsed() < self.window)
    }

    /// Store `result` keyed by its target id, replacing any prior entry.
    pub fn put(&mut self, result: QueryResult) {
        self.entries.insert(result.target_id.clone(), result);
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
