//! Idle-time task queue.
//!
//! Deferred tasks wait until the UI reports no pending interactions. The
//! queue is plain FIFO; nothing orders deferred tasks beyond submission.

use std::collections::VecDeque;

use crate::action::DeferredTask;

/// FIFO queue of [`DeferredTask`]s.
#[derive(Debug, Default)]
pub struct IdleQueue {
    tasks: VecDeque<DeferredTask>,
}

impl IdleQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a task.
    pub fn push(&mut self, task: DeferredTask) {
        self.tasks.push_back(task);
    }

    /// Take every queued task in submission order.
    pub fn drain(&mut self) -> Vec<DeferredTask> {
        self.tasks.drain(..).collect()
    }

    /// Discard every queued task. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
