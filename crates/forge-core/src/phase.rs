// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Per-phase artifacts shared between sandbox, analysis, and pipeline crates:
//! `PhaseResult`, and the `StaticAnalysisResult`/`TestResults` types its
//! optional fields carry.

use crate::error::ExecutionError;
use crate::status::PipelinePhase;
use serde::{Deserialize, Serialize};

/// Outcome of one static analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticAnalysisResult {
    pub syntax_valid: bool,
    pub syntax_errors: Vec<ExecutionError>,
    pub lint_errors: Vec<ExecutionError>,
    pub lint_output: String,
    pub overall_score: u8,
    pub passes_gate: bool,
}

/// Aggregate outcome of the test-execution phase.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TestResults {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl TestResults {
    /// `100 * passed / total`, or `0` when no tests ran.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.passed as f64 / self.total as f64
        }
    }
}

/// Record of one phase execution within a pipeline iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase: PipelinePhase,
    pub success: bool,
    pub duration_ms: u64,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub errors: Vec<ExecutionError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_files: Option<Vec<crate::request::ProjectFile>>,
    #[serde(default)]
    pub tokens_used: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<StaticAnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<TestResults>,
}

impl PhaseResult {
    pub fn new(phase: PipelinePhase, success: bool, duration_ms: u64, output: impl Into<String>) -> Self {
        Self {
            phase,
            success,
            duration_ms,
            output: output.into(),
            exit_code: None,
            errors: Vec::new(),
            output_files: None,
            tokens_used: 0,
            analysis: None,
            test_results: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<ExecutionError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_tokens_used(mut self, tokens_used: u64) -> Self {
        self.tokens_used = tokens_used;
        self
    }
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;
