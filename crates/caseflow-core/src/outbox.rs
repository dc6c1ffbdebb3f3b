//! Retention-bounded store for cases leaving the pipeline.
//!
//! The outbox stage holds finished cases for a configurable window so that
//! operators can still inspect them, then lets them lapse. Entries are
//! reaped opportunistically on insert and on demand; an entry past its
//! retention window is treated as absent even if not yet reaped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::case::CaseRecord;

/// A single held case with its arrival timestamp.
struct OutboxEntry {
    case: CaseRecord,
    held_since: Instant,
}

/// A thread-safe retention store for cases.
///
/// Cloning an `Outbox` creates a new handle to the same underlying data
/// (via `Arc`), so one store can be shared between the production side
/// (a simulator callback inserting cases) and the inspection side.
pub struct Outbox {
    entries: Arc<RwLock<HashMap<Uuid, OutboxEntry>>>,
    retention: Duration,
}

impl Clone for Outbox {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            retention: self.retention,
        }
    }
}

impl Outbox {
    /// Create a new, empty outbox with the given retention window.
    #[must_use]
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            retention,
        }
    }

    /// Retention window entries are held for.
    #[must_use]
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Insert a case, reaping lapsed entries first.
    pub async fn insert(&self, case: CaseRecord) {
        let mut guard = self.entries.write().await;
        let retention = self.retention;
        guard.retain(|_, e| e.held_since.elapsed() < retention);
        guard.insert(
            case.id,
            OutboxEntry {
                case,
                held_since: Instant::now(),
            },
        );
    }

    /// Remove and return a held case by id.
    ///
    /// Returns `None` if the case was never held, was already taken, or has
    /// lapsed (even if not yet reaped).
    pub async fn take(&self, id: Uuid) -> Option<CaseRecord> {
        let entry = self.entries.write().await.remove(&id)?;
        if entry.held_since.elapsed() >= self.retention {
            None
        } else {
            Some(entry.case)
        }
    }

    /// All currently held, unlapsed cases.
    pub async fn cases(&self) -> Vec<CaseRecord> {
        let retention = self.retention;
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.held_since.elapsed() < retention)
            .map(|e| e.case.clone())
            .collect()
    }

    /// Number of held, unlapsed cases.
    pub async fn len(&self) -> usize {
        let retention = self.retention;
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.held_since.elapsed() < retention)
            .count()
    }

    /// Whether no unlapsed cases are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Reap all lapsed entries. Call periodically to bound memory usage.
    pub async fn reap_expired(&self) {
        let retention = self.retention;
        self.entries
            .write()
            .await
            .retain(|_, e| e.held_since.elapsed() < retention);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_take() {
        let outbox = Outbox::new(Duration::from_secs(60));
        let case = CaseRecord::new("Test", "#T0001");
        let id = case.id;
        outbox.insert(case).await;

        let taken = outbox.take(id).await;
        assert_eq!(taken.map(|c| c.case_number), Some("#T0001".to_string()));

        // Second take returns None.
        assert!(outbox.take(id).await.is_none());
    }

    #[tokio::test]
    async fn lapsed_entries_are_absent() {
        let outbox = Outbox::new(Duration::from_millis(1));
        let case = CaseRecord::new("Stale", "#T0002");
        let id = case.id;
        outbox.insert(case).await;

        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(outbox.take(id).await.is_none());
        assert!(outbox.cases().await.is_empty());
    }

    #[tokio::test]
    async fn insert_reaps_lapsed_entries() {
        let outbox = Outbox::new(Duration::from_millis(1));
        outbox.insert(CaseRecord::new("Old", "#T0003")).await;

        tokio::time::sleep(Duration::from_millis(10)).await;

        outbox.insert(CaseRecord::new("New", "#T0004")).await;

        // Only the fresh entry remains in the underlying map.
        assert_eq!(outbox.len().await, 1);
        let cases = outbox.cases().await;
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].case_number, "#T0004");
    }

    #[tokio::test]
    async fn clone_shares_underlying_store() {
        let outbox = Outbox::new(Duration::from_secs(60));
        let handle = outbox.clone();
        handle.insert(CaseRecord::new("Shared", "#T0005")).await;
        assert_eq!(outbox.len().await, 1);
    }

    #[tokio::test]
    async fn reap_expired_removes_stale_entries() {
        let outbox = Outbox::new(Duration::from_millis(1));
        outbox.insert(CaseRecord::new("Stale", "#T0006")).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        outbox.reap_expired().await;
        assert!(outbox.is_empty().await);
    }
}
