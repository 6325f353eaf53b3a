use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::kernel::Extent;
use crate::progress::{CommitKind, ProgressEvent, ProgressSink};

/// Global bounds and counters as seen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtremumSnapshot {
    /// Smallest kernel value committed so far.
    pub minimum: f64,
    /// Largest kernel value committed so far.
    pub maximum: f64,
    /// Counted commits, one per gradient assignment.
    pub iterations_completed: u64,
    /// Commits that moved either bound.
    pub updates: u64,
    /// False until the first commit.
    pub initialized: bool,
}

impl ExtremumSnapshot {
    /// `max(-minimum, maximum)`.
    pub fn largest(&self) -> f64 {
        (-self.minimum).max(self.maximum)
    }
}

/// Position of a commit inside its worker's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerProgress {
    /// Worker index.
    pub worker: usize,
    /// Number of workers.
    pub workers: usize,
    /// Assignments the worker has finished, including this one.
    pub completed: u64,
    /// Size of the worker's range.
    pub assigned: u64,
}

/// Mutex-guarded running minimum and maximum shared by all workers.
///
/// After the first commit the minimum never increases and the maximum never
/// decreases.
#[derive(Debug)]
pub struct ExtremumState {
    inner: Mutex<ExtremumSnapshot>,
    total: u64,
    show_every: bool,
}

impl ExtremumState {
    /// Creates an uninitialized state for a search of `total` assignments.
    pub fn new(total: u64, show_every: bool) -> Self {
        Self {
            inner: Mutex::new(ExtremumSnapshot::default()),
            total,
            show_every,
        }
    }

    // Commits leave the snapshot consistent at every step, so a panic in
    // another worker does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, ExtremumSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merges a local extent into the global bounds.
    ///
    /// Returns true when either bound strictly improved; the first commit
    /// always counts as an improvement. Refinement commits do not advance
    /// the iteration counter. An event goes to `sink` on every improvement,
    /// and on every commit when `show_every` is set.
    pub fn commit(
        &self,
        extent: Extent,
        refinement: bool,
        progress: WorkerProgress,
        sink: &dyn ProgressSink,
    ) -> bool {
        let mut state = self.lock();
        let updated = if state.initialized {
            let mut moved = false;
            if extent.minimum < state.minimum {
                state.minimum = extent.minimum;
                moved = true;
            }
            if extent.maximum > state.maximum {
                state.maximum = extent.maximum;
                moved = true;
            }
            moved
        } else {
            state.minimum = extent.minimum;
            state.maximum = extent.maximum;
            state.initialized = true;
            true
        };
        if !refinement {
            state.iterations_completed += 1;
        }
        if updated {
            state.updates += 1;
        }
        if updated || self.show_every {
            let kind = if refinement {
                CommitKind::Refinement
            } else {
                CommitKind::Counted {
                    completed: state.iterations_completed,
                    total: self.total,
                }
            };
            sink.record(&ProgressEvent {
                kind,
                worker: progress.worker,
                workers: progress.workers,
                local_completed: progress.completed,
                local_total: progress.assigned,
                minimum: state.minimum,
                maximum: state.maximum,
                largest: state.largest(),
                updated,
            });
        }
        updated
    }

    /// Copy of the current bounds and counters.
    pub fn snapshot(&self) -> ExtremumSnapshot {
        *self.lock()
    }

    /// Assignments in the whole search.
    pub fn total(&self) -> u64 {
        self.total
    }
}
