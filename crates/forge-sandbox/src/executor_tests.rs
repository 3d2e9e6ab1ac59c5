// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use crate::container_runtime::FakeContainerRuntime;
use forge_core::{ExecutionPhase, Language, ProjectFile, SequentialIdGen};
use tempfile::tempdir;

fn request(timeout_secs: u64) -> ExecutionRequest {
    ExecutionRequest {
        project_id: "proj-1".to_string(),
        language: Language::Python,
        files: vec![ProjectFile::new("main.py", "print(1)").unwrap()],
        entry_point: None,
        phase: ExecutionPhase::Run,
        timeout_seconds: timeout_secs,
        allow_network: false,
        env: Vec::new(),
    }
}

fn make_executor(runtime: FakeContainerRuntime) -> SandboxExecutor<FakeContainerRuntime, SequentialIdGen> {
    let dir = tempdir().unwrap();
    SandboxExecutor::new(
        runtime,
        SequentialIdGen::new("exec"),
        dir.into_path(),
        2,
        ResourceLimits::default(),
    )
}

#[tokio::test]
async fn successful_execution_reports_success() {
    let runtime = FakeContainerRuntime::new();
    runtime.set_default_output(crate::container_runtime::ContainerOutput {
        exit_code: 0,
        stdout: "hello\n".to_string(),
        stderr: String::new(),
        timed_out: false,
    });
    let executor = make_executor(runtime);

    let result = executor.execute(request(30), CancelToken::new()).await.unwrap();
    assert!(result.success);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "hello\n");
}

#[tokio::test]
async fn non_zero_exit_with_runtime_error_is_not_success() {
    let runtime = FakeContainerRuntime::new();
    runtime.set_default_output(crate::container_runtime::ContainerOutput {
        exit_code: 1,
        stdout: String::new(),
        stderr: "boom\n".to_string(),
        timed_out: false,
    });
    let executor = make_executor(runtime);

    let result = executor.execute(request(30), CancelToken::new()).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn timed_out_container_produces_cancelled_result() {
    let runtime = FakeContainerRuntime::new();
    runtime.set_default_output(crate::container_runtime::ContainerOutput {
        exit_code: -1,
        stdout: String::new(),
        stderr: String::new(),
        timed_out: true,
    });
    let executor = make_executor(runtime);

    let result = executor.execute(request(30), CancelToken::new()).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.exit_code, -1);
}

#[tokio::test]
async fn retry_stops_at_non_retryable_syntax_error() {
    let runtime = FakeContainerRuntime::new();
    runtime.set_default_output(crate::container_runtime::ContainerOutput {
        exit_code: 1,
        stdout: String::new(),
        stderr: "File \"main.py\", line 1\nSyntaxError: invalid syntax".to_string(),
        timed_out: false,
    });
    let executor = make_executor(runtime.clone());

    let result = executor
        .execute_with_retry(request(30), 5, CancelToken::new())
        .await
        .unwrap();
    assert_eq!(result.retry_count, 0);
    assert_eq!(runtime.runs().len(), 1);
}

#[tokio::test]
async fn retry_exhausts_max_retries_on_retryable_failure() {
    let runtime = FakeContainerRuntime::new();
    runtime.set_default_output(crate::container_runtime::ContainerOutput {
        exit_code: 1,
        stdout: String::new(),
        stderr: "connection refused\n".to_string(),
        timed_out: false,
    });
    let executor = make_executor(runtime.clone());

    let result = executor
        .execute_with_retry(request(30), 2, CancelToken::new())
        .await
        .unwrap();
    assert_eq!(result.retry_count, 2);
    assert_eq!(runtime.runs().len(), 3);
}

#[tokio::test]
async fn cleanup_container_removes_via_runtime() {
    let runtime = FakeContainerRuntime::new();
    let executor = make_executor(runtime.clone());

    executor.cleanup_container("forge-7").await.unwrap();
    assert_eq!(runtime.removed(), vec!["forge-7".to_string()]);
}

#[tokio::test]
async fn cancelled_token_short_circuits_before_admission() {
    let runtime = FakeContainerRuntime::new();
    let executor = make_executor(runtime.clone());
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = executor.execute(request(30), cancel).await.unwrap();
    assert!(!result.success);
    assert!(runtime.runs().is_empty());
}
