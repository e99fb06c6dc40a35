//! Priority frontier for the Dijkstra and A* searches.
//!
//! Entries are stored in a min-heap keyed by `(rank, insertion_order)`.
//! Lower ranks are popped first; ties are broken by insertion order
//! (FIFO), which keeps visitation sequences reproducible.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    item: T,
    rank: i32,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural order; the heap stores `Reverse` to pop the smallest.
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue with first-in-first-served ties.
pub(crate) struct PriorityFrontier<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> PriorityFrontier<T> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub(crate) fn push(&mut self, item: T, rank: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { item, rank, seq }));
    }

    /// Pop the lowest-rank item (ties broken FIFO), with its rank.
    pub(crate) fn pop(&mut self) -> Option<(T, i32)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.rank))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
