// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Final pipeline outcome.

use crate::phase::PhaseResult;
use crate::request::ProjectFile;
use crate::status::PipelineStatus;
use crate::verification::VerificationResult;
use serde::{Deserialize, Serialize};

/// Hard ceiling on pipeline iterations.
pub const MAX_TOTAL_ITERATIONS: u32 = 10;

/// Hard ceiling on self-correction attempts per failing-phase class.
pub const MAX_SELF_CORRECTION_ATTEMPTS: u32 = 5;

/// The terminal (or, while running, transient) record of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub project_id: String,
    pub request_id: String,
    pub status: PipelineStatus,
    pub started_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_ms: Option<u64>,
    pub iterations: u32,
    pub phases: Vec<PhaseResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_files: Option<Vec<ProjectFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<VerificationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub total_cost: f64,
}

impl PipelineResult {
    pub fn new(project_id: impl Into<String>, request_id: impl Into<String>, started_at_ms: u64) -> Self {
        Self {
            project_id: project_id.into(),
            request_id: request_id.into(),
            status: PipelineStatus::Pending,
            started_at_ms,
            completed_at_ms: None,
            total_duration_ms: None,
            iterations: 0,
            phases: Vec::new(),
            output_files: None,
            verification: None,
            error_message: None,
            total_cost: 0.0,
        }
    }

    /// Finalize the result with a terminal status, computing duration from
    /// `completed_at_ms - started_at_ms`.
    pub fn finalize(
        &mut self,
        status: PipelineStatus,
        completed_at_ms: u64,
        error_message: Option<String>,
    ) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.completed_at_ms = Some(completed_at_ms);
        self.total_duration_ms = Some(completed_at_ms.saturating_sub(self.started_at_ms));
        self.error_message = error_message;
    }

    /// Invariants: iterations never exceed the hard cap, and cost
    /// is never negative.
    pub fn upholds_invariants(&self) -> bool {
        self.iterations <= MAX_TOTAL_ITERATIONS && self.total_cost >= 0.0
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
