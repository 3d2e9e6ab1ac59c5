// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Fixed-size worker pool draining the bounded job channel.

use crate::queue::JobQueue;
use crate::webhook::{deliver, WebhookPayload};
use forge_core::{Clock, IdGen, JobId, JobStatus, PipelineStatus, RateLimited, Sandboxed};
use forge_core::{Analyzed, TestsGenerated, Verified};
use forge_generate::CodeGenerator;
use forge_pipeline::AgentPipeline;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, info_span, warn};

/// Spawns `worker_count` tasks, each reading jobs off `receiver` until the
/// channel closes (signalling pool shutdown) and running them through
/// `pipeline` one at a time.
#[allow(clippy::too_many_arguments)]
pub fn spawn_worker_pool<I, C, G, S, A, T, V, R>(
    worker_count: usize,
    receiver: mpsc::Receiver<JobId>,
    queue: JobQueue<I, C>,
    pipeline: Arc<AgentPipeline<G, S, A, T, V, R, C>>,
    webhook_client: reqwest::Client,
    webhook_timeout: Duration,
) -> Vec<tokio::task::JoinHandle<()>>
where
    I: IdGen + 'static,
    C: Clock + 'static,
    G: CodeGenerator + 'static,
    S: Sandboxed + 'static,
    A: Analyzed + 'static,
    T: TestsGenerated + 'static,
    V: Verified + 'static,
    R: RateLimited + 'static,
{
    let receiver = Arc::new(tokio::sync::Mutex::new(receiver));
    (0..worker_count.max(1))
        .map(|worker_idx| {
            let receiver = receiver.clone();
            let queue = queue.clone();
            let pipeline = pipeline.clone();
            let webhook_client = webhook_client.clone();
            tokio::spawn(async move {
                loop {
                    let next = { receiver.lock().await.recv().await };
                    let Some(job_id) = next else {
                        info!(worker_idx, "worker channel closed, shutting down");
                        return;
                    };
                    process_one(worker_idx, &job_id, &queue, &pipeline, &webhook_client, webhook_timeout).await;
                }
            })
        })
        .collect()
}

async fn process_one<I, C, G, S, A, T, V, R>(
    worker_idx: usize,
    job_id: &JobId,
    queue: &JobQueue<I, C>,
    pipeline: &AgentPipeline<G, S, A, T, V, R, C>,
    webhook_client: &reqwest::Client,
    webhook_timeout: Duration,
) where
    I: IdGen,
    C: Clock,
    G: CodeGenerator,
    S: Sandboxed,
    A: Analyzed,
    T: TestsGenerated,
    V: Verified,
    R: RateLimited,
{
    let span = info_span!("worker", worker_idx, job_id = %job_id);
    let _guard = span.enter();

    let Some(job) = queue.get_job(job_id) else {
        warn!("dequeued job vanished from the jobs map");
        return;
    };

    // A job cancelled while still queued is short-circuited without running
    // the pipeline.
    if job.is_terminal() {
        return;
    }

    // Link the effective execution token to both the host shutdown signal
    // and the job's own public-facing cancel token.
    let exec_cancel = queue.shutdown_token().child();
    {
        let job_cancel = job.cancel.clone();
        let exec_cancel = exec_cancel.clone();
        tokio::spawn(async move {
            job_cancel.cancelled().await;
            exec_cancel.cancel();
        });
    }

    queue.mark_running(job_id);
    info!("pipeline started");

    let result = pipeline
        .execute(job.request.clone(), job_id.to_string(), exec_cancel)
        .await;

    let job_status = JobStatus::from_pipeline_status(result.status);
    let message = result.error_message.clone();
    queue.store_result(job_id, job_status, message.clone(), result.clone());

    if let Some(webhook_url) = job.webhook_url.as_deref() {
        let payload = WebhookPayload {
            job_id: job_id.to_string(),
            project_id: result.project_id.clone(),
            status: result.status.to_string(),
            success: matches!(result.status, PipelineStatus::Success),
            iterations: result.iterations,
            duration_ms: result.total_duration_ms.unwrap_or(0),
            error: message,
        };
        deliver(webhook_client, webhook_url, &payload, webhook_timeout).await;
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
