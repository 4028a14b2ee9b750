//! Mutex-guarded FIFO of problem indices.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Shared job queue.
///
/// Holds the indices of problems still to be solved. Every `pop` takes the
/// lock just long enough to remove the head, so each index is handed to
/// exactly one caller.
#[derive(Debug, Default)]
pub struct JobQueue {
    inner: Mutex<VecDeque<usize>>,
}

impl JobQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue holding `0..count` in order.
    pub fn seeded(count: usize) -> Self {
        Self {
            inner: Mutex::new((0..count).collect()),
        }
    }

    /// Appends an index at the back.
    pub fn push(&self, index: usize) {
        self.lock().push_back(index);
    }

    /// Removes and returns the front index, or `None` when drained.
    pub fn pop(&self) -> Option<usize> {
        self.lock().pop_front()
    }

    /// Number of indices still queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue is drained.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Every critical section is a single VecDeque call, so a poisoned lock
    // still guards a consistent deque.
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<usize>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
