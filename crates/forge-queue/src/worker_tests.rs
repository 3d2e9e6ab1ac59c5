// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use crate::config::QueueConfig;
use forge_analysis::{StaticAnalyzer, TestGenerator};
use forge_core::{CancelToken, FakeClock, PipelineRequest, ProjectFile, SequentialIdGen};
use forge_generate::FakeCodeGenerator;
use forge_pipeline::PipelineConfig;
use forge_ratelimit::{RateLimitConfig, RateLimiter};
use forge_sandbox::{FakeContainerRuntime, ResourceLimits, SandboxExecutor};
use forge_verify::{VerificationGate, VerifyConfig};
use std::collections::HashMap;
use std::time::Duration;

type TestPipeline = AgentPipeline<
    FakeCodeGenerator,
    SandboxExecutor<FakeContainerRuntime, SequentialIdGen>,
    StaticAnalyzer<SandboxExecutor<FakeContainerRuntime, SequentialIdGen>>,
    TestGenerator,
    VerificationGate,
    RateLimiter<FakeClock>,
    FakeClock,
>;

fn build_pipeline(clock: FakeClock) -> Arc<TestPipeline> {
    let workspace_root = std::env::temp_dir().join(format!("forge-queue-test-{}", std::process::id()));
    let sandbox = Arc::new(SandboxExecutor::new(
        FakeContainerRuntime::new(),
        SequentialIdGen::new("sandbox"),
        workspace_root,
        5,
        ResourceLimits::default(),
    ));
    let analyzer = Arc::new(StaticAnalyzer::new(sandbox.clone()));
    Arc::new(AgentPipeline::new(
        Arc::new(FakeCodeGenerator::new()),
        sandbox,
        analyzer,
        Arc::new(TestGenerator::new()),
        Arc::new(VerificationGate::new(VerifyConfig::default())),
        Arc::new(RateLimiter::new(RateLimitConfig::default(), clock.clone())),
        clock,
        PipelineConfig::default(),
    ))
}

fn python_request() -> PipelineRequest {
    PipelineRequest {
        project_id: "proj-1".to_string(),
        user_id: "user-1".to_string(),
        language: "python".to_string(),
        prompt: "add two numbers".to_string(),
        files: vec![ProjectFile::new("main.py", "def add(a, b): return a + b").unwrap()],
        entry_point: None,
        run_after_build: false,
        context: HashMap::new(),
        max_iterations: 10,
    }
}

#[tokio::test]
async fn worker_pool_drains_a_job_to_a_stored_result() {
    let clock = FakeClock::new();
    let shutdown = CancelToken::new();
    let (queue, receiver) = JobQueue::new(&QueueConfig::default(), SequentialIdGen::new("job"), clock.clone(), shutdown);
    let pipeline = build_pipeline(clock);
    let webhook_client = reqwest::Client::new();

    let handles = spawn_worker_pool(1, receiver, queue.clone(), pipeline, webhook_client, Duration::from_secs(5));

    let id = queue.enqueue(python_request(), None, CancelToken::new()).await.unwrap();

    let result = wait_for_result(&queue, &id).await;
    assert_eq!(result.status, forge_core::PipelineStatus::Success);
    assert_eq!(queue.get_status(&id).unwrap(), JobStatus::Completed);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn cancelling_a_queued_job_short_circuits_the_worker() {
    let clock = FakeClock::new();
    let shutdown = CancelToken::new();
    let (queue, receiver) = JobQueue::new(&QueueConfig::default(), SequentialIdGen::new("job"), clock.clone(), shutdown);
    let pipeline = build_pipeline(clock);
    let webhook_client = reqwest::Client::new();

    let id = queue.enqueue(python_request(), None, CancelToken::new()).await.unwrap();
    assert!(queue.cancel(&id));

    let handles = spawn_worker_pool(1, receiver, queue.clone(), pipeline, webhook_client, Duration::from_secs(5));

    // Give the worker a moment to dequeue and observe the cancelled job.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(queue.get_status(&id).unwrap(), JobStatus::Cancelled);
    assert!(queue.get_result(&id).is_none());

    for handle in handles {
        handle.abort();
    }
}

async fn wait_for_result(queue: &JobQueue<SequentialIdGen, FakeClock>, id: &JobId) -> forge_core::PipelineResult {
    for _ in 0..100 {
        if let Some(result) = queue.get_result(id) {
            return result;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for job result");
}
