//! Deadline-ordered timer queue shared by every upload item.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Upload progress tick.
    Upload,
    /// Delayed start of the processing phase.
    Handoff,
    /// Processing step tick.
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub due: Duration,
    pub item_id: Uuid,
    pub kind: TimerKind,
    seq: u64,
}

impl Ord for Timer {
    // Equal deadlines fire in scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Timer>>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, item_id: Uuid, kind: TimerKind, due: Duration) {
        let timer = Timer {
            due,
            item_id,
            kind,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(Reverse(timer));
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Timer> {
        match self.heap.peek() {
            Some(Reverse(timer)) if timer.due <= now => self.heap.pop().map(|Reverse(t)| t),
            _ => None,
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(t)| t.due)
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
