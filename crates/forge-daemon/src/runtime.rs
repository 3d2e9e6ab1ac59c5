// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Composition root: wires every component crate into one runnable
//! `JobQueue` + worker pool, the shape spec.md §2 calls the control/data
//! flow ("a caller enqueues a `PipelineRequest` ... a worker picks it up").

use crate::config::DaemonConfig;
use crate::generator::Generator;
use forge_analysis::{StaticAnalyzer, TestGenerator};
use forge_core::{CancelToken, JobId, JobStatus, PipelineJob, PipelineRequest, PipelineResult, SystemClock, UuidIdGen};
use forge_generate::{FakeCodeGenerator, HttpCodeGenerator};
use forge_pipeline::AgentPipeline;
use forge_queue::{spawn_worker_pool, JobQueue, QueueError};
use forge_ratelimit::RateLimiter;
use forge_sandbox::{ProcessContainerRuntime, SandboxExecutor};
use forge_verify::VerificationGate;
use std::sync::Arc;
use tracing::info;

type Pipeline = AgentPipeline<
    Generator,
    SandboxExecutor<ProcessContainerRuntime, UuidIdGen>,
    StaticAnalyzer<SandboxExecutor<ProcessContainerRuntime, UuidIdGen>>,
    TestGenerator,
    VerificationGate,
    RateLimiter<SystemClock>,
    SystemClock,
>;

/// The running system: an admission queue, a fixed worker pool draining it,
/// and handles the worker tasks are running on.
pub struct Runtime {
    queue: JobQueue<UuidIdGen, SystemClock>,
    workers: Vec<tokio::task::JoinHandle<()>>,
    shutdown: CancelToken,
}

impl Runtime {
    /// Build every component from `config` and spawn the worker pool. Does
    /// not block; the caller drives the runtime via [`Runtime::submit`] and
    /// friends, then calls [`Runtime::shutdown`] when done.
    pub fn start(config: &DaemonConfig) -> Self {
        let generator = match &config.generation_endpoint {
            Some(endpoint) => Generator::Http(HttpCodeGenerator::new(endpoint.clone(), config.generation_timeout)),
            None => {
                info!("no FORGE_GENERATION_ENDPOINT configured; using the in-memory fake generator");
                Generator::Fake(FakeCodeGenerator::new())
            }
        };

        let sandbox = Arc::new(SandboxExecutor::new(
            ProcessContainerRuntime::new(),
            UuidIdGen,
            config.workspace_root.clone(),
            config.max_concurrent_executions,
            config.resource_limits.clone(),
        ));
        let analyzer = Arc::new(StaticAnalyzer::new(sandbox.clone()));
        let test_generator = Arc::new(TestGenerator::new());
        let gate = Arc::new(VerificationGate::new(config.verify.clone()));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone(), SystemClock));

        let pipeline = Arc::new(Pipeline::new(
            Arc::new(generator),
            sandbox,
            analyzer,
            test_generator,
            gate,
            rate_limiter,
            SystemClock,
            config.pipeline.clone(),
        ));

        let shutdown = CancelToken::new();
        let (queue, receiver) = JobQueue::new(&config.queue, UuidIdGen, SystemClock, shutdown.clone());
        let workers = spawn_worker_pool(
            config.queue.worker_count,
            receiver,
            queue.clone(),
            pipeline,
            reqwest::Client::new(),
            config.queue.webhook_timeout,
        );

        info!(worker_count = config.queue.worker_count, "worker pool started");
        Self { queue, workers, shutdown }
    }

    /// Admit a request; blocks until a queue slot frees up or `cancel` fires.
    pub async fn submit(
        &self,
        request: PipelineRequest,
        webhook_url: Option<String>,
        cancel: CancelToken,
    ) -> Result<JobId, QueueError> {
        self.queue.enqueue(request, webhook_url, cancel).await
    }

    pub fn job(&self, id: &JobId) -> Option<PipelineJob> {
        self.queue.get_job(id)
    }

    pub fn status(&self, id: &JobId) -> Result<JobStatus, QueueError> {
        self.queue.get_status(id)
    }

    pub fn result(&self, id: &JobId) -> Option<PipelineResult> {
        self.queue.get_result(id)
    }

    pub fn cancel(&self, id: &JobId) -> bool {
        self.queue.cancel(id)
    }

    /// Poll `get_result` at a fixed interval until the job reaches a
    /// terminal status. Intended for one-shot callers (e.g. the bin's
    /// single-request mode); a real transport would instead subscribe to
    /// webhook delivery.
    pub async fn await_result(&self, id: &JobId, poll_interval: std::time::Duration) -> Option<PipelineResult> {
        loop {
            if let Some(result) = self.queue.get_result(id) {
                return Some(result);
            }
            match self.queue.get_status(id) {
                Ok(status) if status.is_terminal() => return self.queue.get_result(id),
                Ok(_) => {}
                Err(_) => return None,
            }
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Signal every worker's shutdown token and wait for the pool to drain.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        drop(self.queue);
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
