//! Commit notifications emitted by the shared extremum state.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Which kind of commit produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CommitKind {
    /// Coarse pass over one gradient assignment.
    Counted {
        /// Assignments committed so far across all workers.
        completed: u64,
        /// Assignments in the whole search.
        total: u64,
    },
    /// Re-sample of an assignment at the refinement density.
    Refinement,
}

/// One progress line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Commit kind and global progress.
    pub kind: CommitKind,
    /// Index of the committing worker.
    pub worker: usize,
    /// Number of workers in the run.
    pub workers: usize,
    /// Assignments the worker has finished.
    pub local_completed: u64,
    /// Assignments in the worker's range.
    pub local_total: u64,
    /// Global minimum after the commit.
    pub minimum: f64,
    /// Global maximum after the commit.
    pub maximum: f64,
    /// `max(-minimum, maximum)`.
    pub largest: f64,
    /// Whether the commit moved either bound.
    pub updated: bool,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CommitKind::Counted { completed, total } => write!(f, "progress={completed}/{total}")?,
            CommitKind::Refinement => write!(f, "progress=retry")?,
        }
        write!(
            f,
            " (thread={}/{}; progress={}/{}) min={} max={} largest={}",
            self.worker + 1,
            self.workers,
            self.local_completed,
            self.local_total,
            self.minimum,
            self.maximum,
            self.largest
        )?;
        if self.updated {
            write!(f, " [updated]")?;
        }
        Ok(())
    }
}

/// Receives progress events. Called with the state lock held, so events
/// arrive in commit order and implementations must not block for long.
pub trait ProgressSink: Send + Sync {
    /// Handles one event.
    fn record(&self, event: &ProgressEvent);
}

/// Logs every event at `info` through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn record(&self, event: &ProgressEvent) {
        info!(target: "sxe::progress", updated = event.updated, "{event}");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn record(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_progress_line() {
        let event = ProgressEvent {
            kind: CommitKind::Counted {
                completed: 3,
                total: 120,
            },
            worker: 0,
            workers: 4,
            local_completed: 3,
            local_total: 30,
            minimum: -0.5,
            maximum: 0.25,
            largest: 0.5,
            updated: true,
        };
        assert_eq!(
            event.to_string(),
            "progress=3/120 (thread=1/4; progress=3/30) min=-0.5 max=0.25 largest=0.5 [updated]"
        );
        let retry = ProgressEvent {
            kind: CommitKind::Refinement,
            updated: false,
            ..event
        };
        assert!(retry.to_string().starts_with("progress=retry (thread=1/4;"));
        assert!(!retry.to_string().ends_with("[updated]"));
    }
}
