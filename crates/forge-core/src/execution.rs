// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Sandbox execution request/result types.

use crate::error::ExecutionError;
use crate::language::Language;
use crate::request::ProjectFile;
use crate::status::ExecutionPhase;
use serde::{Deserialize, Serialize};

/// One sandboxed invocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub project_id: String,
    pub language: Language,
    pub files: Vec<ProjectFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    pub phase: ExecutionPhase,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub allow_network: bool,
    #[serde(default)]
    pub env: Vec<(String, String)>,
}

impl ExecutionRequest {
    /// `timeout_seconds` must be strictly positive.
    pub fn is_valid(&self) -> bool {
        self.timeout_seconds > 0
    }
}

/// Result of one sandboxed invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub container_id: String,
    pub execution_time_ms: u64,
    pub language: Language,
    pub phase: ExecutionPhase,
    #[serde(default)]
    pub errors: Vec<ExecutionError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(default)]
    pub retry_count: u32,
}

impl ExecutionResult {
    /// A cancelled invocation reports `exit_code = -1` and a `Timeout`
    /// error.
    pub fn cancelled(container_id: String, language: Language, phase: ExecutionPhase) -> Self {
        Self {
            success: false,
            exit_code: -1,
            stdout: String::new(),
            stderr: String::new(),
            container_id,
            execution_time_ms: 0,
            language,
            phase,
            errors: vec![ExecutionError::new(
                crate::error::ExecutionErrorType::Timeout,
                "execution cancelled or timed out",
            )],
            stack_trace: None,
            retry_count: 0,
        }
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
