// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `SandboxExecutor`: the concrete `Sandboxed` capability.

use crate::container_runtime::{ContainerOutput, ContainerRuntime, ContainerSpec};
use crate::diagnostics::{extract_stack_trace, parse_diagnostics};
use crate::entrypoint;
use crate::error::SandboxError;
use crate::workspace;
use forge_core::{
    CancelToken, ExecutionRequest, ExecutionResult, IdGen, Sandboxed,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

/// Resource caps applied to every container launch, independent of request
/// contents.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    pub memory_limit_mb: u64,
    pub cpu_limit: f64,
    pub pids_limit: u64,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            memory_limit_mb: 512,
            cpu_limit: 1.0,
            pids_limit: 256,
        }
    }
}

/// Owns per-container working directories for their lifetime, enforces
/// `MaxConcurrentExecutions` admission, and performs retry with exponential
/// backoff, distinguishing retryable from terminal failure classes.
pub struct SandboxExecutor<R: ContainerRuntime, G: IdGen + 'static> {
    runtime: Arc<R>,
    id_gen: Arc<G>,
    workspace_root: PathBuf,
    admission: Arc<Semaphore>,
    limits: ResourceLimits,
}

impl<R: ContainerRuntime, G: IdGen + 'static> SandboxExecutor<R, G> {
    pub fn new(runtime: R, id_gen: G, workspace_root: PathBuf, max_concurrent_executions: usize, limits: ResourceLimits) -> Self {
        Self {
            runtime: Arc::new(runtime),
            id_gen: Arc::new(id_gen),
            workspace_root,
            admission: Arc::new(Semaphore::new(max_concurrent_executions.max(1))),
            limits,
        }
    }

    #[instrument(skip(self, request, cancel), fields(language = %request.language, phase = %request.phase))]
    async fn execute_once(&self, request: &ExecutionRequest, cancel: &CancelToken) -> Result<ExecutionResult, SandboxError> {
        let _permit = tokio::select! {
            permit = self.admission.acquire() => permit.map_err(|_| SandboxError::SemaphoreClosed)?,
            _ = cancel.cancelled() => return Ok(ExecutionResult::cancelled(
                "admission-cancelled".to_string(),
                request.language,
                request.phase,
            )),
        };

        let container_id = format!("forge-{}", self.id_gen.next());
        let workdir = self.workspace_root.join(&container_id);
        workspace::materialize(&workdir, &request.files)?;

        let script = entrypoint::render(request.language, request.phase, request.entry_point.as_deref());
        let script_path = workdir.join("entrypoint.sh");
        tokio::fs::write(&script_path, script).await?;

        let spec = ContainerSpec {
            container_id: container_id.clone(),
            image: request.language.default_base_image().to_string(),
            workdir_host_path: workdir.clone(),
            command: "sh entrypoint.sh".to_string(),
            env: request.env.clone(),
            language: request.language,
            memory_limit_mb: self.limits.memory_limit_mb,
            cpu_limit: self.limits.cpu_limit,
            pids_limit: self.limits.pids_limit,
            allow_network: request.allow_network,
            timeout: Duration::from_secs(request.timeout_seconds),
        };

        let started = Instant::now();
        let run_result = self.runtime.run(spec, cancel.child()).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        workspace::cleanup(&workdir).ok();

        let output = match run_result {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "container launch failed");
                return Ok(ExecutionResult {
                    success: false,
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: String::new(),
                    container_id,
                    execution_time_ms: elapsed_ms,
                    language: request.language,
                    phase: request.phase,
                    errors: vec![forge_core::ExecutionError::new(
                        forge_core::ExecutionErrorType::Internal,
                        err.to_string(),
                    )],
                    stack_trace: None,
                    retry_count: 0,
                });
            }
        };

        Ok(self.build_result(container_id, elapsed_ms, request, output))
    }

    /// Idempotent out-of-band teardown: force-remove the container if still
    /// present and delete its workdir. Normal
    /// executions already clean up inline; this exists for callers that need
    /// to reclaim a container after an abnormal process exit.
    pub async fn cleanup_container(&self, container_id: &str) -> Result<(), SandboxError> {
        self.runtime.remove(container_id).await?;
        workspace::cleanup(&self.workspace_root.join(container_id))
    }

    fn build_result(
        &self,
        container_id: String,
        elapsed_ms: u64,
        request: &ExecutionRequest,
        output: ContainerOutput,
    ) -> ExecutionResult {
        if output.timed_out {
            let mut result = ExecutionResult::cancelled(container_id, request.language, request.phase);
            result.execution_time_ms = elapsed_ms;
            return result;
        }

        let errors = parse_diagnostics(&output.stdout, &output.stderr);
        let stack_trace = extract_stack_trace(&output.stdout, &output.stderr);
        let success = output.exit_code == 0 && errors.is_empty();

        ExecutionResult {
            success,
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            container_id,
            execution_time_ms: elapsed_ms,
            language: request.language,
            phase: request.phase,
            errors,
            stack_trace,
            retry_count: 0,
        }
    }
}

#[async_trait::async_trait]
impl<R: ContainerRuntime, G: IdGen + 'static> Sandboxed for SandboxExecutor<R, G> {
    type Error = SandboxError;

    async fn execute(&self, request: ExecutionRequest, cancel: CancelToken) -> Result<ExecutionResult, SandboxError> {
        self.execute_once(&request, &cancel).await
    }

    #[instrument(skip(self, request, cancel), fields(max_retries))]
    async fn execute_with_retry(
        &self,
        request: ExecutionRequest,
        max_retries: u32,
        cancel: CancelToken,
    ) -> Result<ExecutionResult, SandboxError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut result = self.execute_once(&request, &cancel).await?;
            result.retry_count = attempt - 1;

            let non_retryable = result.errors.iter().any(|e| e.is_non_retryable());
            if result.success || non_retryable || attempt > max_retries || cancel.is_cancelled() {
                return Ok(result);
            }

            let backoff = Duration::from_secs(1u64 << (attempt - 1));
            info!(attempt, backoff_secs = backoff.as_secs(), "retrying sandbox execution");
            tokio::select! {
                _ = tokio::time::sleep(backoff) => {}
                _ = cancel.cancelled() => return Ok(result),
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
