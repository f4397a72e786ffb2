//! Bucket-chained priority queue over cell indices
//!
//! Priorities (distance + heuristic) are small non-negative integers, so
//! the frontier keeps one bucket per priority value and chains cells
//! intrusively through their search records. This gives O(1) amortized
//! enqueue/dequeue and an O(1) decrease-key, which a binary heap does not.

use super::record::{SearchRecord, NO_CELL};
use crate::core::types::CellIndex;

/// The set of cells pending expansion, ordered by search priority
#[derive(Debug, Default)]
pub struct CellFrontier {
    /// Chain head per priority value, `NO_CELL` when empty
    buckets: Vec<u32>,
    /// Lowest bucket that may still hold a cell; only moves forward
    /// between clears because priorities never decrease past it
    minimum: usize,
    len: usize,
}

impl CellFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a cell at its record's current priority
    pub fn enqueue(&mut self, cell: CellIndex, records: &mut [SearchRecord]) {
        let priority = records[cell.as_usize()].priority() as usize;
        if priority < self.minimum {
            self.minimum = priority;
        }
        if priority >= self.buckets.len() {
            self.buckets.resize(priority + 1, NO_CELL);
        }
        records[cell.as_usize()].next = self.buckets[priority];
        self.buckets[priority] = cell.0;
        self.len += 1;
    }

    /// Unlink and return the lowest-priority cell, or `None` when the
    /// frontier is exhausted.
    pub fn try_dequeue(&mut self, records: &mut [SearchRecord]) -> Option<CellIndex> {
        if self.len == 0 {
            return None;
        }
        while self.minimum < self.buckets.len() {
            let head = self.buckets[self.minimum];
            if head != NO_CELL {
                self.buckets[self.minimum] = records[head as usize].next;
                self.len -= 1;
                return Some(CellIndex(head));
            }
            self.minimum += 1;
        }
        None
    }

    /// Move a cell that is already on the frontier to its record's new
    /// (lower) priority. `old_priority` must be the priority it was
    /// enqueued under.
    pub fn change_priority(
        &mut self,
        cell: CellIndex,
        old_priority: i32,
        records: &mut [SearchRecord],
    ) {
        let bucket = old_priority as usize;
        let mut current = self.buckets[bucket];
        if current == cell.0 {
            self.buckets[bucket] = records[cell.as_usize()].next;
        } else {
            loop {
                let next = records[current as usize].next;
                if next == cell.0 {
                    records[current as usize].next = records[cell.as_usize()].next;
                    break;
                }
                current = next;
            }
        }
        self.len -= 1;
        self.enqueue(cell, records);
    }

    /// Cheap reset between searches: drop all chain heads, keep capacity
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.minimum = 0;
        self.len = 0;
    }
}
