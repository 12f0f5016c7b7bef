//! Single-worker queue serializing Habitica writes.
//!
//! Habitica does not tolerate concurrent mutations against one account. Every
//! write of a run is enqueued here and the orchestrator drains the queue one
//! job at a time, awaiting each job's calls before taking the next.

use crate::sync::domain::{HistoryRecord, PendingDeletion};
use std::collections::VecDeque;

/// One unit of Habitica work.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteJob {
    /// Delete the Habitica task of a deleted source task.
    Delete(PendingDeletion),
    /// Create or update the Habitica task mirroring a changed record.
    Sync(HistoryRecord),
}

/// FIFO of write jobs; deletions are queued ahead of syncs.
#[derive(Debug, Clone, Default)]
pub struct SerialWriteQueue {
    jobs: VecDeque<WriteJob>,
}

impl SerialWriteQueue {
    /// Builds the queue for one run.
    #[must_use]
    pub fn new(deletions: Vec<PendingDeletion>, changes: Vec<HistoryRecord>) -> Self {
        let jobs = deletions
            .into_iter()
            .map(WriteJob::Delete)
            .chain(changes.into_iter().map(WriteJob::Sync))
            .collect();
        Self { jobs }
    }

    /// Takes the next job. The caller must finish it before calling again.
    pub fn next_job(&mut self) -> Option<WriteJob> {
        self.jobs.pop_front()
    }

    /// Number of jobs still queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns `true` when every job has been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
