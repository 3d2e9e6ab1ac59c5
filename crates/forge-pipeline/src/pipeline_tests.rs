// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use forge_analysis::{StaticAnalyzer, TestGenerator};
use forge_core::{CancelToken, FakeClock, Language, PipelineRequest, PipelineStatus, ProjectFile, SequentialIdGen};
use forge_generate::FakeCodeGenerator;
use forge_ratelimit::{RateLimitConfig, RateLimiter};
use forge_sandbox::container_runtime::ContainerOutput;
use forge_sandbox::{FakeContainerRuntime, ResourceLimits, SandboxExecutor};
use forge_verify::{VerificationGate, VerifyConfig};
use std::sync::Arc;

type TestPipeline = AgentPipeline<
    FakeCodeGenerator,
    SandboxExecutor<FakeContainerRuntime, SequentialIdGen>,
    StaticAnalyzer<SandboxExecutor<FakeContainerRuntime, SequentialIdGen>>,
    TestGenerator,
    VerificationGate,
    RateLimiter<FakeClock>,
    FakeClock,
>;

fn build_pipeline(
    generator: FakeCodeGenerator,
    runtime: FakeContainerRuntime,
    clock: FakeClock,
    config: PipelineConfig,
) -> TestPipeline {
    let workspace_root = std::env::temp_dir().join(format!("forge-pipeline-test-{}", uuid_like()));
    let sandbox = Arc::new(SandboxExecutor::new(
        runtime,
        SequentialIdGen::new("test"),
        workspace_root,
        5,
        ResourceLimits::default(),
    ));
    let analyzer = Arc::new(StaticAnalyzer::new(sandbox.clone()));
    let test_generator = Arc::new(TestGenerator::new());
    let gate = Arc::new(VerificationGate::new(VerifyConfig::default()));
    let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::default(), clock.clone()));

    AgentPipeline::new(Arc::new(generator), sandbox, analyzer, test_generator, gate, rate_limiter, clock, config)
}

/// A cheap process-unique suffix so parallel tests don't collide on the same
/// temp workspace root.
fn uuid_like() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("{}-{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

fn python_request() -> PipelineRequest {
    PipelineRequest {
        project_id: "proj-1".to_string(),
        user_id: "user-1".to_string(),
        language: "python".to_string(),
        prompt: "add two numbers".to_string(),
        files: vec![ProjectFile::new("main.py", "def add(a, b): return a + b").expect("valid file")],
        entry_point: None,
        run_after_build: false,
        context: std::collections::HashMap::new(),
        max_iterations: 10,
    }
}

#[tokio::test]
async fn happy_path_reaches_success() {
    let generator = FakeCodeGenerator::new();
    let runtime = FakeContainerRuntime::new();
    let clock = FakeClock::new();
    let pipeline = build_pipeline(generator, runtime, clock, PipelineConfig::default());

    let result = pipeline.execute(python_request(), "req-1", CancelToken::new()).await;

    assert_eq!(result.status, PipelineStatus::Success);
    assert_eq!(result.phases.iter().filter(|p| p.phase == PipelinePhase::Verify).count(), 1);
    let verification = result.verification.expect("verification result present on success");
    assert!(verification.passed);
    assert!(verification.score >= 70);
    assert!(result.total_cost > 0.0);
}

#[tokio::test]
async fn syntax_loop_exhausts_self_correction_budget() {
    let generator = FakeCodeGenerator::new();
    let runtime = FakeContainerRuntime::new();
    // eslint-style JSON lint output with a lowercase "error" in the message,
    // so `StaticAnalyzer::passes_gate` rejects it every iteration.
    runtime.program_by_command_contains(
        "eslint",
        ContainerOutput {
            exit_code: 1,
            stdout: r#"[{"message":"syntax error: unexpected token ;","path":"index.js","line":1,"column":27}]"#.to_string(),
            stderr: String::new(),
            timed_out: false,
        },
    );
    let clock = FakeClock::new();
    let pipeline = build_pipeline(generator, runtime, clock, PipelineConfig::default());

    let request = PipelineRequest {
        language: "javascript".to_string(),
        files: vec![ProjectFile::new("index.js", "function f(a){ return a+; }").expect("valid file")],
        ..python_request()
    };

    let result = pipeline.execute(request, "req-2", CancelToken::new()).await;

    assert_eq!(result.status, PipelineStatus::StaticAnalysisFailed);
    assert_eq!(result.iterations, 5);
    assert!(result
        .phases
        .iter()
        .filter(|p| p.phase == PipelinePhase::StaticAnalyze)
        .all(|p| !p.success));
}

#[tokio::test]
async fn admission_denial_short_circuits_before_any_phase_runs() {
    let generator = FakeCodeGenerator::new();
    let runtime = FakeContainerRuntime::new();
    let clock = FakeClock::new();
    let mut config = RateLimitConfig::default();
    config.max_requests_per_minute = 0;
    let workspace_root = std::env::temp_dir().join(format!("forge-pipeline-test-{}", uuid_like()));
    let sandbox = Arc::new(SandboxExecutor::new(
        runtime,
        SequentialIdGen::new("test"),
        workspace_root,
        5,
        ResourceLimits::default(),
    ));
    let analyzer = Arc::new(StaticAnalyzer::new(sandbox.clone()));
    let pipeline = AgentPipeline::new(
        Arc::new(generator),
        sandbox,
        analyzer,
        Arc::new(TestGenerator::new()),
        Arc::new(VerificationGate::new(VerifyConfig::default())),
        Arc::new(RateLimiter::new(config, clock.clone())),
        clock,
        PipelineConfig::default(),
    );

    let result = pipeline.execute(python_request(), "req-3", CancelToken::new()).await;

    assert_eq!(result.status, PipelineStatus::RateLimited);
    assert!(result.phases.is_empty());
    assert_eq!(result.iterations, 0);
    assert_eq!(result.total_cost, 0.0);
}

#[tokio::test]
async fn security_gate_fails_verification_on_hardcoded_secret() {
    let generator = FakeCodeGenerator::new();
    let runtime = FakeContainerRuntime::new();
    let clock = FakeClock::new();
    let pipeline = build_pipeline(generator, runtime, clock, PipelineConfig::default());

    let request = PipelineRequest {
        files: vec![ProjectFile::new("config.py", "api_key = \"sk-abc123456789\"\ndef add(a, b): return a + b")
            .expect("valid file")],
        ..python_request()
    };

    let result = pipeline.execute(request, "req-5", CancelToken::new()).await;

    assert_eq!(result.status, PipelineStatus::VerificationFailed);
    let verification = result.verification.expect("verification result present on failure");
    assert!(!verification.passed);
    assert!(verification
        .checks
        .iter()
        .any(|c| c.category == forge_core::VerificationCategory::Security && !c.passed));
    assert!(verification
        .issues
        .iter()
        .any(|i| i.severity == forge_core::IssueSeverity::Critical));
}

#[tokio::test]
async fn cancellation_before_start_short_circuits() {
    let generator = FakeCodeGenerator::new();
    let runtime = FakeContainerRuntime::new();
    let clock = FakeClock::new();
    let pipeline = build_pipeline(generator, runtime, clock, PipelineConfig::default());

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = pipeline.execute(python_request(), "req-4", cancel).await;

    assert_eq!(result.status, PipelineStatus::Cancelled);
}
