// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Tagged status enums: tagged variants instead of open inheritance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase requested of one `SandboxExecutor::execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionPhase {
    StaticAnalysis,
    DependencyResolution,
    Build,
    Run,
    Test,
}

impl fmt::Display for ExecutionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::StaticAnalysis => "static_analysis",
            Self::DependencyResolution => "dependency_resolution",
            Self::Build => "build",
            Self::Run => "run",
            Self::Test => "test",
        };
        write!(f, "{s}")
    }
}

/// One phase of a single pipeline iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Generate,
    StaticAnalyze,
    Build,
    TestGenerate,
    TestExecute,
    Execute,
    Verify,
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Generate => "generate",
            Self::StaticAnalyze => "static_analyze",
            Self::Build => "build",
            Self::TestGenerate => "test_generate",
            Self::TestExecute => "test_execute",
            Self::Execute => "execute",
            Self::Verify => "verify",
        };
        write!(f, "{s}")
    }
}

/// Terminal (and transient) status of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Pending,
    Running,
    Success,
    GenerationFailed,
    StaticAnalysisFailed,
    BuildFailed,
    TestsFailed,
    RuntimeFailed,
    VerificationFailed,
    RateLimited,
    Cancelled,
    InternalError,
}

impl PipelineStatus {
    /// Whether this status is a final resting state (no further phases run).
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::GenerationFailed => "generation_failed",
            Self::StaticAnalysisFailed => "static_analysis_failed",
            Self::BuildFailed => "build_failed",
            Self::TestsFailed => "tests_failed",
            Self::RuntimeFailed => "runtime_failed",
            Self::VerificationFailed => "verification_failed",
            Self::RateLimited => "rate_limited",
            Self::Cancelled => "cancelled",
            Self::InternalError => "internal_error",
        };
        write!(f, "{s}")
    }
}

/// Status of an enqueued job as observed by `JobQueue` callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Map a terminal `PipelineStatus` to the job-level status stored by the
    /// worker.
    pub fn from_pipeline_status(status: PipelineStatus) -> Self {
        match status {
            PipelineStatus::Success => Self::Completed,
            PipelineStatus::Cancelled => Self::Cancelled,
            _ => Self::Failed,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Category of a verification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationCategory {
    Quality,
    Tests,
    Security,
    Build,
    Runtime,
}

impl fmt::Display for VerificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Quality => "quality",
            Self::Tests => "tests",
            Self::Security => "security",
            Self::Build => "build",
            Self::Runtime => "runtime",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
