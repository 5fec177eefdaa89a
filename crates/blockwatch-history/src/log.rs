//! FIFO-capped append-only history for a single cell.
//!
//! Eviction is strictly by insertion order: once a log holds `capacity`
//! records, each append drops the oldest one first. Reading never reorders
//! or evicts anything.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use blockwatch_types::ActionRecord;

use crate::error::HistoryError;

/// A validated, positive per-cell record limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HistoryCapacity(NonZeroUsize);

impl HistoryCapacity {
    /// Validate a configured limit.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidCapacity`] if `limit` is zero or
    /// negative (or does not fit in `usize`).
    pub fn new(limit: i64) -> Result<Self, HistoryError> {
        usize::try_from(limit)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(HistoryError::InvalidCapacity(limit))
    }

    /// The limit as a plain count.
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for HistoryCapacity {
    fn from(n: NonZeroUsize) -> Self {
        Self(n)
    }
}

/// Ordered, bounded sequence of [`ActionRecord`]s.
#[derive(Debug, Clone)]
pub struct BoundedLog {
    capacity: HistoryCapacity,
    records: VecDeque<ActionRecord>,
}

impl BoundedLog {
    /// An empty log holding at most `capacity` records.
    pub fn new(capacity: HistoryCapacity) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// Append `record`, evicting the oldest record first when full.
    ///
    /// Returns the evicted record, if any.
    pub fn append(&mut self, record: ActionRecord) -> Option<ActionRecord> {
        let evicted = if self.records.len() >= self.capacity.get() {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Records oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActionRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// Owned copy of the records, oldest first.
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.records.iter().cloned().collect()
    }

    /// The most recently appended record.
    pub fn last(&self) -> Option<&ActionRecord> {
        self.records.back()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured limit.
    pub const fn capacity(&self) -> HistoryCapacity {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use blockwatch_types::{Action, ActorId, BlockActionKind, StructureDescriptor};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;

    fn record(kind: BlockActionKind, second: i64) -> ActionRecord {
        ActionRecord::block(
            ActorId::from(uuid::Uuid::nil()),
            Utc.timestamp_opt(second, 0).single().unwrap_or_default(),
            Arc::new(StructureDescriptor::new("router", 1)),
            kind,
        )
    }

    fn kinds(log: &BoundedLog) -> Vec<BlockActionKind> {
        log.iter()
            .filter_map(|r| match r.action {
                Action::Block { kind } => Some(kind),
                Action::Config(_) => None,
            })
            .collect()
    }

    #[test]
    fn capacity_rejects_non_positive() {
        assert_eq!(HistoryCapacity::new(0), Err(HistoryError::InvalidCapacity(0)));
        assert_eq!(HistoryCapacity::new(-3), Err(HistoryError::InvalidCapacity(-3)));
        assert_eq!(HistoryCapacity::new(7).map(HistoryCapacity::get), Ok(7));
    }

    #[test]
    fn oldest_record_evicted_at_capacity() {
        let Ok(capacity) = HistoryCapacity::new(3) else {
            return;
        };
        let mut log = BoundedLog::new(capacity);
        assert!(log.append(record(BlockActionKind::Break, 1)).is_none());
        assert!(log.append(record(BlockActionKind::Place, 2)).is_none());
        assert!(log.append(record(BlockActionKind::Break, 3)).is_none());
        let evicted = log.append(record(BlockActionKind::Place, 4));
        assert_eq!(evicted.map(|r| r.timestamp.timestamp()), Some(1));
        assert_eq!(
            kinds(&log),
            vec![
                BlockActionKind::Place,
                BlockActionKind::Break,
                BlockActionKind::Place
            ]
        );
    }

    #[test]
    fn last_is_newest() {
        let Ok(capacity) = HistoryCapacity::new(2) else {
            return;
        };
        let mut log = BoundedLog::new(capacity);
        assert!(log.last().is_none());
        log.append(record(BlockActionKind::Place, 10));
        log.append(record(BlockActionKind::Break, 11));
        assert_eq!(log.last().map(|r| r.timestamp.timestamp()), Some(11));
        assert_eq!(log.snapshot().len(), 2);
    }

    proptest! {
        /// After `n` appends the log holds the last `min(n, capacity)`
        /// records in insertion order.
        #[test]
        fn keeps_last_n_in_order(capacity in 1_i64..16, appends in 0_i64..64) {
            let Ok(cap) = HistoryCapacity::new(capacity) else {
                return Err(TestCaseError::fail("capacity rejected"));
            };
            let mut log = BoundedLog::new(cap);
            for second in 0..appends {
                log.append(record(BlockActionKind::Place, second));
            }
            let kept: Vec<i64> = log.iter().map(|r| r.timestamp.timestamp()).collect();
            let expected: Vec<i64> = (appends.saturating_sub(capacity).max(0)..appends).collect();
            prop_assert_eq!(kept, expected);
        }
    }
}
