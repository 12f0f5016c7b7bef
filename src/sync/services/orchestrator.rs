//! End-to-end sync run.

use super::change_detector::detect_changes;
use super::queue::{SerialWriteQueue, WriteJob};
use super::translator::{TaskTranslator, TaskWrite, due_date};
use crate::sync::{
    domain::{
        AttributeTable, HistoryRecord, PendingDeletion, SourceTask, SourceTaskId, SyncHistory,
        TargetTask, TaskType,
    },
    ports::{
        HistoryStore, HistoryStoreError, SourceService, SourceServiceError, TargetService,
        TargetServiceError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a sync run.
///
/// Writes already applied to Habitica stay applied, but the history is not
/// persisted, so the next run re-detects and retries the remaining work.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The history could not be loaded or saved.
    #[error(transparent)]
    History(#[from] HistoryStoreError),

    /// Fetching from Todoist failed.
    #[error(transparent)]
    Source(#[from] SourceServiceError),

    /// A Habitica call for one task failed.
    #[error("failed to sync task {task_id}: {error}")]
    Target {
        /// Source task being processed.
        task_id: SourceTaskId,
        /// Underlying failure.
        #[source]
        error: TargetServiceError,
    },

    /// Habitica answered a write without identifying the stored task.
    #[error("target returned no task id for source task {0}")]
    UnexpectedResponse(SourceTaskId),
}

/// Result type for sync runs.
pub type SyncResult<T> = Result<T, SyncError>;

/// Counts of the writes a run performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Tasks created on Habitica.
    pub created: usize,
    /// Field updates issued.
    pub updated: usize,
    /// Score calls issued.
    pub scored: usize,
    /// Habitica tasks deleted.
    pub deleted: usize,
    /// Deleted source tasks dropped from history without a Habitica task.
    pub forgotten: usize,
}

impl SyncReport {
    /// Total number of Habitica calls issued.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.created + self.updated + self.scored + self.deleted
    }
}

/// Run-scoped state handed from stage to stage.
///
/// `baseline` is the history exactly as loaded; `history` accumulates the
/// merged delta and every successful write.
#[derive(Debug, Clone)]
pub struct SyncContext {
    /// History being built by this run.
    pub history: SyncHistory,
    /// History as loaded at run start.
    pub baseline: SyncHistory,
    /// Label-to-attribute table for this run.
    pub attributes: AttributeTable,
}

impl SyncContext {
    /// Starts a run from the loaded history.
    #[must_use]
    pub fn new(history: SyncHistory, attributes: AttributeTable) -> Self {
        Self {
            baseline: history.clone(),
            history,
            attributes,
        }
    }
}

/// Drives one Todoist to Habitica sync.
#[derive(Clone)]
pub struct SyncOrchestrator<S, T, H, C>
where
    S: SourceService,
    T: TargetService,
    H: HistoryStore,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    target: Arc<T>,
    history: Arc<H>,
    clock: Arc<C>,
}

impl<S, T, H, C> SyncOrchestrator<S, T, H, C>
where
    S: SourceService,
    T: TargetService,
    H: HistoryStore,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator over the given ports.
    #[must_use]
    pub const fn new(source: Arc<S>, target: Arc<T>, history: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            source,
            target,
            history,
            clock,
        }
    }

    /// Runs one sync.
    ///
    /// Both Todoist reads complete before the first Habitica write, writes
    /// are issued strictly one at a time, and the history is saved only
    /// after every queued write succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on the first failing call; the stored history is
    /// then left as it was before the run.
    pub async fn run(&self) -> SyncResult<SyncReport> {
        let mut context = self.prepare().await?;

        let deletions = self.merge_delta(&mut context).await?;
        let changes = detect_changes(&context.history, &context.baseline);
        info!("creating/updating {} tasks", changes.len());

        let mut queue = SerialWriteQueue::new(deletions, changes);
        let report = self.drain(&mut queue, &mut context).await?;

        self.history.save(&context.history).await?;
        info!(
            created = report.created,
            updated = report.updated,
            scored = report.scored,
            deleted = report.deleted,
            "saved sync history"
        );
        Ok(report)
    }

    async fn prepare(&self) -> SyncResult<SyncContext> {
        let history = self.history.load().await?;
        info!("read {} tasks from history", history.len());
        let labels = self.source.fetch_labels().await?;
        let attributes = AttributeTable::from_labels(&labels);
        debug!(
            labels = labels.len(),
            attribute_labels = attributes.len(),
            "built attribute table"
        );
        Ok(SyncContext::new(history, attributes))
    }

    async fn merge_delta(&self, context: &mut SyncContext) -> SyncResult<Vec<PendingDeletion>> {
        let delta = self
            .source
            .fetch_delta(context.history.sync_cursor.as_ref())
            .await?;
        debug!(items = delta.items.len(), "fetched source delta");
        Ok(context.history.merge_delta(delta))
    }

    async fn drain(
        &self,
        queue: &mut SerialWriteQueue,
        context: &mut SyncContext,
    ) -> SyncResult<SyncReport> {
        let mut report = SyncReport::default();
        let translator = TaskTranslator::new(&context.attributes, &*self.clock);

        while let Some(job) = queue.next_job() {
            match job {
                WriteJob::Delete(deletion) => self.apply_deletion(deletion, &mut report).await?,
                WriteJob::Sync(record) => {
                    let HistoryRecord {
                        last_known_source_task: Some(source),
                        last_known_target_task: previous,
                    } = record
                    else {
                        continue;
                    };
                    let write = translator.translate(&source, previous.as_ref());
                    let stored = self.apply_write(&source, write, &mut report).await?;
                    context
                        .history
                        .tasks
                        .insert(source.id.clone(), HistoryRecord::synced(source, stored));
                }
            }
        }
        Ok(report)
    }

    async fn apply_deletion(
        &self,
        deletion: PendingDeletion,
        report: &mut SyncReport,
    ) -> SyncResult<()> {
        let Some(target_id) = deletion.target_id else {
            debug!(task = %deletion.source_id, "deleted task was never synced");
            report.forgotten += 1;
            return Ok(());
        };
        info!(task = %deletion.source_id, "deleting {target_id}");
        self.target
            .delete_task(&target_id)
            .await
            .map_err(|error| SyncError::Target {
                task_id: deletion.source_id,
                error,
            })?;
        report.deleted += 1;
        Ok(())
    }

    async fn apply_write(
        &self,
        source: &SourceTask,
        write: TaskWrite,
        report: &mut SyncReport,
    ) -> SyncResult<TargetTask> {
        let failed = |error: TargetServiceError| SyncError::Target {
            task_id: source.id.clone(),
            error,
        };

        let mut stored = match write {
            TaskWrite::Create { payload } => {
                info!("creating {}: {}", payload.task_type.as_str(), payload.text);
                let created = self.target.create_task(&payload).await.map_err(failed)?;
                report.created += 1;
                created
            }
            TaskWrite::Update {
                target_id,
                score,
                payload,
            } => {
                if let Some(direction) = score {
                    info!(
                        "updating completion of {} ({}): {}",
                        payload.task_type.as_str(),
                        direction.as_str(),
                        payload.text
                    );
                    self.target
                        .update_task_score(&target_id, direction)
                        .await
                        .map_err(failed)?;
                    report.scored += 1;
                }
                info!("updating {}: {}", payload.task_type.as_str(), payload.text);
                let updated = self
                    .target
                    .update_task(&target_id, &payload)
                    .await
                    .map_err(failed)?;
                report.updated += 1;
                updated
            }
        };

        if stored.id.is_none() {
            return Err(SyncError::UnexpectedResponse(source.id.clone()));
        }
        if stored.task_type == TaskType::Daily {
            stored.date = due_date(source);
        }
        Ok(stored)
    }
}
