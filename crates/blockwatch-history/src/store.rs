//! Per-cell history store.
//!
//! Logs are created lazily on the first write to a cell and live until the
//! world is reset. Read-only lookups never create a log.

use std::collections::BTreeMap;

use blockwatch_types::{ActionRecord, CellKey};

use crate::log::{BoundedLog, HistoryCapacity};

/// Mapping from cell key to that cell's [`BoundedLog`].
#[derive(Debug, Clone)]
pub struct HistoryStore {
    capacity: HistoryCapacity,
    logs: BTreeMap<CellKey, BoundedLog>,
}

impl HistoryStore {
    /// An empty store whose logs hold at most `capacity` records each.
    pub const fn new(capacity: HistoryCapacity) -> Self {
        Self {
            capacity,
            logs: BTreeMap::new(),
        }
    }

    /// The log for `key`, created empty if absent.
    pub fn record_for(&mut self, key: CellKey) -> &mut BoundedLog {
        let capacity = self.capacity;
        self.logs
            .entry(key)
            .or_insert_with(|| BoundedLog::new(capacity))
    }

    /// Append a record to the log for `key`.
    pub fn append(&mut self, key: CellKey, record: ActionRecord) {
        if let Some(evicted) = self.record_for(key).append(record) {
            tracing::trace!(
                cell = %key.unpack(),
                evicted_at = %evicted.timestamp,
                "history full, oldest record evicted"
            );
        }
    }

    /// The log for `key`, without creating one.
    pub fn get(&self, key: CellKey) -> Option<&BoundedLog> {
        self.logs.get(&key)
    }

    /// Whether `key` has no records. Never creates a log.
    pub fn is_empty(&self, key: CellKey) -> bool {
        self.logs.get(&key).is_none_or(BoundedLog::is_empty)
    }

    /// The most recent record stored for `key`.
    pub fn last(&self, key: CellKey) -> Option<&ActionRecord> {
        self.logs.get(&key).and_then(BoundedLog::last)
    }

    /// Every non-empty log with its key, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &BoundedLog)> {
        self.logs.iter().map(|(key, log)| (*key, log))
    }

    /// Number of cells with a log.
    pub fn cell_count(&self) -> usize {
        self.logs.len()
    }

    /// Discard every log.
    pub fn reset(&mut self) {
        self.logs.clear();
    }

    /// The per-cell limit.
    pub const fn capacity(&self) -> HistoryCapacity {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blockwatch_types::{ActorId, BlockActionKind, CellPos, StructureDescriptor};
    use chrono::Utc;

    use super::*;

    fn store(limit: i64) -> Option<HistoryStore> {
        HistoryCapacity::new(limit).ok().map(HistoryStore::new)
    }

    fn place() -> ActionRecord {
        ActionRecord::block(
            ActorId::new(),
            Utc::now(),
            Arc::new(StructureDescriptor::new("conveyor", 1)),
            BlockActionKind::Place,
        )
    }

    #[test]
    fn is_empty_does_not_create_entries() {
        let Some(store) = store(5) else {
            return;
        };
        assert!(store.is_empty(CellPos::new(1, 1).pack()));
        assert_eq!(store.cell_count(), 0);
    }

    #[test]
    fn record_for_creates_lazily_with_capacity() {
        let Some(mut store) = store(4) else {
            return;
        };
        let key = CellPos::new(2, 3).pack();
        assert_eq!(store.record_for(key).capacity().get(), 4);
        assert_eq!(store.cell_count(), 1);
        assert!(store.is_empty(key));
    }

    #[test]
    fn append_then_reset() {
        let Some(mut store) = store(2) else {
            return;
        };
        let key = CellPos::new(7, 7).pack();
        store.append(key, place());
        store.append(key, place());
        store.append(key, place());
        assert_eq!(store.get(key).map(BoundedLog::len), Some(2));
        assert!(!store.is_empty(key));

        store.reset();
        assert!(store.is_empty(key));
        assert_eq!(store.cell_count(), 0);
    }
}
