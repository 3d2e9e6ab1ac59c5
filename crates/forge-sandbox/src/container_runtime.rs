// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Container launch abstraction.

use crate::error::SandboxError;
use async_trait::async_trait;
use forge_core::{CancelToken, Language};
use std::path::PathBuf;
use std::time::Duration;

/// Mandatory restrictions and mount points for one container invocation.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub container_id: String,
    pub image: String,
    pub workdir_host_path: PathBuf,
    pub command: String,
    pub env: Vec<(String, String)>,
    pub language: Language,
    pub memory_limit_mb: u64,
    pub cpu_limit: f64,
    pub pids_limit: u64,
    pub allow_network: bool,
    pub timeout: Duration,
}

/// Raw result of one container run, before diagnostic parsing.
#[derive(Debug, Clone)]
pub struct ContainerOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

/// Launches and tears down sandboxed containers. Abstracted so
/// `SandboxExecutor` is testable without a container runtime installed.
#[async_trait]
pub trait ContainerRuntime: Send + Sync + 'static {
    /// Launch `spec`, stream output, and wait for exit or `spec.timeout` /
    /// `cancel`, whichever comes first. Always removes the container before
    /// returning.
    async fn run(&self, spec: ContainerSpec, cancel: CancelToken) -> Result<ContainerOutput, SandboxError>;

    /// Idempotent force-removal of a container by id.
    async fn remove(&self, container_id: &str) -> Result<(), SandboxError>;
}

/// Production runtime: shells out to the `docker` CLI.
pub struct ProcessContainerRuntime {
    binary: String,
}

impl ProcessContainerRuntime {
    pub fn new() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_args(&self, spec: &ContainerSpec) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--name".to_string(),
            spec.container_id.clone(),
            "-m".to_string(),
            format!("{}m", spec.memory_limit_mb),
            "--cpus".to_string(),
            spec.cpu_limit.to_string(),
            "--pids-limit".to_string(),
            spec.pids_limit.to_string(),
            "--security-opt=no-new-privileges".to_string(),
            "--cap-drop=ALL".to_string(),
            "--read-only".to_string(),
            "--tmpfs".to_string(),
            "/tmp:rw,noexec,nosuid,size=100m".to_string(),
            "-v".to_string(),
            format!("{}:/workspace", spec.workdir_host_path.display()),
            "-w".to_string(),
            "/workspace".to_string(),
            "-e".to_string(),
            "SANDBOX=true".to_string(),
            "-e".to_string(),
            format!("LANGUAGE={}", spec.language),
        ];
        for (key, value) in &spec.env {
            args.push("-e".to_string());
            args.push(format!("{key}={value}"));
        }
        if !spec.allow_network {
            args.push("--network".to_string());
            args.push("none".to_string());
        }
        args.push(spec.image.clone());
        args.push("sh".to_string());
        args.push("-c".to_string());
        args.push(spec.command.clone());
        args
    }
}

impl Default for ProcessContainerRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerRuntime for ProcessContainerRuntime {
    async fn run(&self, spec: ContainerSpec, cancel: CancelToken) -> Result<ContainerOutput, SandboxError> {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.args(self.build_args(&spec));
        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| SandboxError::LaunchFailed(e.to_string()))?;

        let wait = child.wait_with_output();
        tokio::pin!(wait);

        tokio::select! {
            result = &mut wait => {
                let output = result.map_err(|e| SandboxError::Runtime(e.to_string()))?;
                self.remove(&spec.container_id).await.ok();
                Ok(ContainerOutput {
                    exit_code: output.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    timed_out: false,
                })
            }
            _ = tokio::time::sleep(spec.timeout) => {
                self.remove(&spec.container_id).await.ok();
                Ok(ContainerOutput {
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: String::new(),
                    timed_out: true,
                })
            }
            _ = cancel.cancelled() => {
                self.remove(&spec.container_id).await.ok();
                Ok(ContainerOutput {
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: String::new(),
                    timed_out: true,
                })
            }
        }
    }

    async fn remove(&self, container_id: &str) -> Result<(), SandboxError> {
        let status = tokio::process::Command::new(&self.binary)
            .args(["rm", "-f", container_id])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await;
        match status {
            Ok(_) => Ok(()),
            Err(e) => Err(SandboxError::Runtime(e.to_string())),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeContainerRuntime, RecordedRun};

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct RecordedRun {
        pub container_id: String,
        pub image: String,
        pub command: String,
    }

    /// Deterministic fake runtime: programs a canned output per container id,
    /// falling back to a default when none is programmed.
    #[derive(Clone)]
    pub struct FakeContainerRuntime {
        inner: Arc<Mutex<Inner>>,
    }

    struct Inner {
        outputs: HashMap<String, ContainerOutput>,
        default_output: ContainerOutput,
        runs: Vec<RecordedRun>,
        removed: Vec<String>,
    }

    impl FakeContainerRuntime {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(Inner {
                    outputs: HashMap::new(),
                    default_output: ContainerOutput {
                        exit_code: 0,
                        stdout: String::new(),
                        stderr: String::new(),
                        timed_out: false,
                    },
                    runs: Vec::new(),
                    removed: Vec::new(),
                })),
            }
        }

        pub fn program_by_command_contains(&self, needle: &str, output: ContainerOutput) {
            self.inner.lock().outputs.insert(needle.to_string(), output);
        }

        pub fn set_default_output(&self, output: ContainerOutput) {
            self.inner.lock().default_output = output;
        }

        pub fn runs(&self) -> Vec<RecordedRun> {
            self.inner.lock().runs.clone()
        }

        pub fn removed(&self) -> Vec<String> {
            self.inner.lock().removed.clone()
        }
    }

    impl Default for FakeContainerRuntime {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ContainerRuntime for FakeContainerRuntime {
        async fn run(&self, spec: ContainerSpec, cancel: CancelToken) -> Result<ContainerOutput, SandboxError> {
            if cancel.is_cancelled() {
                return Ok(ContainerOutput {
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: String::new(),
                    timed_out: true,
                });
            }
            let mut inner = self.inner.lock();
            inner.runs.push(RecordedRun {
                container_id: spec.container_id.clone(),
                image: spec.image.clone(),
                command: spec.command.clone(),
            });
            let output = inner
                .outputs
                .iter()
                .find(|(needle, _)| spec.command.contains(needle.as_str()))
                .map(|(_, output)| output.clone())
                .unwrap_or_else(|| inner.default_output.clone());
            Ok(output)
        }

        async fn remove(&self, container_id: &str) -> Result<(), SandboxError> {
            self.inner.lock().removed.push(container_id.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "container_runtime_tests.rs"]
mod tests;
