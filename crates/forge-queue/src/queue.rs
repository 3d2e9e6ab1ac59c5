// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Bounded FIFO job queue: admission, lookup, cancellation, and the
//! retention sweep. The worker pool in `worker.rs` is the only consumer of
//! the channel handed back by [`JobQueue::new`].

use crate::config::QueueConfig;
use crate::error::QueueError;
use forge_core::{CancelToken, Clock, IdGen, JobId, JobStatus, PipelineJob, PipelineRequest, PipelineResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

struct Shared<C: Clock> {
    clock: C,
    jobs: Mutex<HashMap<JobId, PipelineJob>>,
    results: Mutex<HashMap<JobId, PipelineResult>>,
    retention_ms: u64,
    /// Cancelled when the host is shutting down; every dequeued job's
    /// execution scope is linked to this token.
    shutdown: CancelToken,
}

/// A bounded, shared job queue. Cheaply cloneable; every clone shares the
/// same underlying state and channel sender.
#[derive(Clone)]
pub struct JobQueue<I, C: Clock> {
    shared: Arc<Shared<C>>,
    sender: mpsc::Sender<JobId>,
    id_gen: I,
}

impl<I: IdGen, C: Clock> JobQueue<I, C> {
    /// Build a new queue plus the receiver half the worker pool consumes.
    pub fn new(config: &QueueConfig, id_gen: I, clock: C, shutdown: CancelToken) -> (Self, mpsc::Receiver<JobId>) {
        let (sender, receiver) = mpsc::channel(config.capacity);
        let shared = Arc::new(Shared {
            clock,
            jobs: Mutex::new(HashMap::new()),
            results: Mutex::new(HashMap::new()),
            retention_ms: config.retention.as_millis() as u64,
            shutdown,
        });
        (Self { shared, sender, id_gen }, receiver)
    }

    pub fn shutdown_token(&self) -> CancelToken {
        self.shared.shutdown.clone()
    }

    /// Admit a new request. Assigns an id and a queue-position snapshot,
    /// records the job, then blocks on the bounded channel until a worker
    /// slot frees up or `cancel` fires.
    pub async fn enqueue(
        &self,
        request: PipelineRequest,
        webhook_url: Option<String>,
        cancel: CancelToken,
    ) -> Result<JobId, QueueError> {
        let id = JobId::new(self.id_gen.next());
        let now_ms = self.shared.clock.epoch_ms();
        let queue_position = {
            let jobs = self.shared.jobs.lock();
            jobs.values().filter(|j| j.status == JobStatus::Queued).count() + 1
        };
        let job = PipelineJob::new(id.clone(), request, queue_position, now_ms, webhook_url);
        self.shared.jobs.lock().insert(id.clone(), job);

        tokio::select! {
            res = self.sender.send(id.clone()) => {
                if res.is_err() {
                    self.shared.jobs.lock().remove(&id);
                    return Err(QueueError::ShuttingDown);
                }
                Ok(id)
            }
            _ = cancel.cancelled() => {
                self.shared.jobs.lock().remove(&id);
                Err(QueueError::EnqueueCancelled)
            }
        }
    }

    pub fn get_job(&self, id: &JobId) -> Option<PipelineJob> {
        self.shared.jobs.lock().get(id).cloned()
    }

    pub fn get_status(&self, id: &JobId) -> Result<JobStatus, QueueError> {
        self.shared
            .jobs
            .lock()
            .get(id)
            .map(|j| j.status)
            .ok_or_else(|| QueueError::NotFound(id.to_string()))
    }

    /// Jobs submitted by `user_id`, most recently created first, capped at
    /// `limit`.
    pub fn list_user_jobs(&self, user_id: &str, limit: usize) -> Vec<PipelineJob> {
        let jobs = self.shared.jobs.lock();
        let mut matching: Vec<PipelineJob> = jobs
            .values()
            .filter(|j| j.request.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
        matching.truncate(limit);
        matching
    }

    /// Transition a `Queued` or `Running` job to `Cancelled` and signal its
    /// cancellation token. No-op (returns `false`) for any other status or
    /// an unknown id.
    pub fn cancel(&self, id: &JobId) -> bool {
        let mut jobs = self.shared.jobs.lock();
        let Some(job) = jobs.get_mut(id) else {
            return false;
        };
        if job.is_terminal() {
            return false;
        }
        let now_ms = self.shared.clock.epoch_ms();
        job.mark_terminal(JobStatus::Cancelled, Some("cancelled by caller".to_string()), now_ms);
        job.cancel.cancel();
        true
    }

    pub fn get_result(&self, id: &JobId) -> Option<PipelineResult> {
        self.shared.results.lock().get(id).cloned()
    }

    /// Used by the worker pool to mark a dequeued job as running.
    pub(crate) fn mark_running(&self, id: &JobId) {
        let now_ms = self.shared.clock.epoch_ms();
        if let Some(job) = self.shared.jobs.lock().get_mut(id) {
            job.mark_running(now_ms);
        }
    }

    /// Used by the worker pool once a pipeline run terminates: records the
    /// job's terminal status/message, stores the full result, then sweeps
    /// anything past retention.
    pub(crate) fn store_result(&self, id: &JobId, status: JobStatus, message: Option<String>, result: PipelineResult) {
        let now_ms = self.shared.clock.epoch_ms();
        if let Some(job) = self.shared.jobs.lock().get_mut(id) {
            job.mark_terminal(status, message, now_ms);
        }
        self.shared.results.lock().insert(id.clone(), result);
        self.sweep_expired(now_ms);
    }

    /// Remove jobs (and their results) whose `completed_at_ms` is older than
    /// `retention_ms`.
    fn sweep_expired(&self, now_ms: u64) {
        let retention_ms = self.shared.retention_ms;
        let mut jobs = self.shared.jobs.lock();
        let expired: Vec<JobId> = jobs
            .values()
            .filter(|j| {
                j.completed_at_ms
                    .is_some_and(|completed| now_ms.saturating_sub(completed) > retention_ms)
            })
            .map(|j| j.id.clone())
            .collect();
        if expired.is_empty() {
            return;
        }
        let mut results = self.shared.results.lock();
        for id in expired {
            jobs.remove(&id);
            results.remove(&id);
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
