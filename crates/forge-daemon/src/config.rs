// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Composition-root configuration: an optional `forge.toml` file overlaid
//! by every component's own `from_env()`, plus the handful of settings that
//! belong to wiring alone (workspace root, generation endpoint,
//! worker/admission sizing).

use forge_pipeline::PipelineConfig;
use forge_queue::QueueConfig;
use forge_ratelimit::RateLimitConfig;
use forge_sandbox::ResourceLimits;
use forge_verify::VerifyConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// The subset of `DaemonConfig` a `forge.toml` file may override. Only the
/// wiring-owned fields are exposed here; each component crate's own section
/// of the workspace is still reached exclusively through its `from_env()`.
#[derive(Debug, Default, Deserialize)]
struct TomlOverlay {
    workspace_root: Option<PathBuf>,
    max_concurrent_executions: Option<usize>,
    memory_limit_mb: Option<u64>,
    cpu_limit: Option<f64>,
    pids_limit: Option<u64>,
    generation_endpoint: Option<String>,
    generation_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub workspace_root: PathBuf,
    pub max_concurrent_executions: usize,
    pub resource_limits: ResourceLimits,
    /// HTTP endpoint the `CodeGenerator` collaborator POSTs requests to.
    /// `None` wires the in-memory fake instead (useful for local runs with
    /// no generation backend configured).
    pub generation_endpoint: Option<String>,
    pub generation_timeout: Duration,
    pub queue: QueueConfig,
    pub rate_limit: RateLimitConfig,
    pub verify: VerifyConfig,
    pub pipeline: PipelineConfig,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            workspace_root: std::env::temp_dir().join("forge-sandboxes"),
            max_concurrent_executions: 5,
            resource_limits: ResourceLimits::default(),
            generation_endpoint: None,
            generation_timeout: Duration::from_secs(60),
            queue: QueueConfig::default(),
            rate_limit: RateLimitConfig::default(),
            verify: VerifyConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl DaemonConfig {
    /// Load defaults, overlay an optional `forge.toml` file (path taken
    /// from `FORGE_CONFIG_PATH`, defaulting to `./forge.toml`; silently
    /// skipped if absent or unparseable), then overlay `FORGE_*`
    /// environment variables on top — env vars always win.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_toml_file();
        config.apply_env();
        config
    }

    fn apply_toml_file(&mut self) {
        let path = std::env::var("FORGE_CONFIG_PATH").unwrap_or_else(|_| "forge.toml".to_string());
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return;
        };
        let overlay: TomlOverlay = match toml::from_str(&raw) {
            Ok(overlay) => overlay,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "ignoring unparseable forge.toml");
                return;
            }
        };

        if let Some(v) = overlay.workspace_root {
            self.workspace_root = v;
        }
        if let Some(v) = overlay.max_concurrent_executions {
            self.max_concurrent_executions = v;
        }
        if let Some(v) = overlay.memory_limit_mb {
            self.resource_limits.memory_limit_mb = v;
        }
        if let Some(v) = overlay.cpu_limit {
            self.resource_limits.cpu_limit = v;
        }
        if let Some(v) = overlay.pids_limit {
            self.resource_limits.pids_limit = v;
        }
        if let Some(v) = overlay.generation_endpoint {
            self.generation_endpoint = Some(v);
        }
        if let Some(v) = overlay.generation_timeout_secs {
            self.generation_timeout = Duration::from_secs(v);
        }
    }

    fn apply_env(&mut self) {
        let config = self;
        if let Ok(path) = std::env::var("FORGE_WORKSPACE_ROOT") {
            config.workspace_root = PathBuf::from(path);
        }
        if let Ok(v) = std::env::var("FORGE_MAX_CONCURRENT_EXECUTIONS") {
            if let Ok(parsed) = v.parse() {
                config.max_concurrent_executions = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_MEMORY_LIMIT_MB") {
            if let Ok(parsed) = v.parse() {
                config.resource_limits.memory_limit_mb = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_CPU_LIMIT") {
            if let Ok(parsed) = v.parse() {
                config.resource_limits.cpu_limit = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_PIDS_LIMIT") {
            if let Ok(parsed) = v.parse() {
                config.resource_limits.pids_limit = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_GENERATION_ENDPOINT") {
            config.generation_endpoint = Some(v);
        }
        if let Ok(v) = std::env::var("FORGE_GENERATION_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                config.generation_timeout = Duration::from_secs(secs);
            }
        }

        config.queue = QueueConfig::from_env();
        config.rate_limit = RateLimitConfig::from_env();
        config.verify = VerifyConfig::from_env();
        config.pipeline = PipelineConfig::from_env();
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
