// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Narrow capability interfaces composed by `AgentPipeline`: tagged variants
//! plus capability traits in place of DI-container service composition.

use crate::cancel::CancelToken;
use crate::execution::{ExecutionRequest, ExecutionResult};
use crate::language::Language;
use crate::phase::{StaticAnalysisResult, TestResults};
use crate::request::ProjectFile;
use crate::verification::VerificationResult;
use async_trait::async_trait;
use std::error::Error as StdError;

/// Capability: run one request inside an isolated sandbox.
#[async_trait]
pub trait Sandboxed: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: CancelToken,
    ) -> Result<ExecutionResult, Self::Error>;

    async fn execute_with_retry(
        &self,
        request: ExecutionRequest,
        max_retries: u32,
        cancel: CancelToken,
    ) -> Result<ExecutionResult, Self::Error>;
}

/// Capability: decide whether a file set is structurally valid.
#[async_trait]
pub trait Analyzed: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    async fn analyze(
        &self,
        project_id: &str,
        language: Language,
        files: &[ProjectFile],
        cancel: CancelToken,
    ) -> Result<StaticAnalysisResult, Self::Error>;
}

/// Capability: synthesize a test file from extracted signatures.
pub trait TestsGenerated: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    fn generate_tests(
        &self,
        language: Language,
        files: &[ProjectFile],
    ) -> Result<Vec<ProjectFile>, Self::Error>;
}

/// Input bundle the verification gate aggregates over.
pub struct VerificationInput<'a> {
    pub project_id: &'a str,
    pub analysis: Option<&'a StaticAnalysisResult>,
    pub test_results: Option<&'a TestResults>,
    pub build_output: &'a str,
    pub build_errors_present: bool,
    pub runtime_errors: &'a [crate::error::ExecutionError],
    pub files: &'a [ProjectFile],
    pub require_tests: bool,
}

/// Capability: aggregate quality/test/security/build/runtime signals into a
/// weighted pass/fail verdict.
pub trait Verified: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    fn verify(&self, input: VerificationInput<'_>, now_ms: u64) -> Result<VerificationResult, Self::Error>;
}

/// Outcome of an admission check.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub message: Option<String>,
    pub retry_after_seconds: Option<u64>,
    pub remaining_requests: u64,
    pub remaining_daily_cost: f64,
}

/// Capability: admit or reject work, and account for its cost.
pub trait RateLimited: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    fn check(&self, project_id: &str, user_id: &str) -> Result<RateLimitDecision, Self::Error>;

    fn record(
        &self,
        project_id: &str,
        user_id: &str,
        result: &crate::result::PipelineResult,
    ) -> Result<f64, Self::Error>;
}
