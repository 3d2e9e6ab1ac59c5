// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `StaticAnalyzer`: the concrete `Analyzed` capability.

use crate::error::AnalysisError;
use crate::syntax::check_brackets;
use forge_core::{
    Analyzed, CancelToken, ExecutionErrorType, ExecutionPhase, ExecutionRequest, Language, ProjectFile, Sandboxed,
    StaticAnalysisResult,
};
use std::sync::Arc;
use tracing::instrument;

const LINT_TIMEOUT_SECS: u64 = 60;

/// Runs the cheap bracket-matching syntax gate, then (only when it passes)
/// invokes the sandbox in `StaticAnalysis` phase and scores the lint output.
pub struct StaticAnalyzer<S: Sandboxed> {
    sandbox: Arc<S>,
}

impl<S: Sandboxed> StaticAnalyzer<S> {
    pub fn new(sandbox: Arc<S>) -> Self {
        Self { sandbox }
    }

    fn score(lint_errors: &[forge_core::ExecutionError]) -> u8 {
        let mut score: i32 = 100;
        for err in lint_errors {
            score -= match err.error_type {
                ExecutionErrorType::CompileError => 10,
                _ if err.message.contains("error") => 10,
                _ if err.message.contains("warning") => 2,
                _ => 1,
            };
        }
        score.clamp(0, 100) as u8
    }

    fn passes_gate(lint_errors: &[forge_core::ExecutionError]) -> bool {
        !lint_errors
            .iter()
            .any(|e| matches!(e.error_type, ExecutionErrorType::CompileError) || e.message.contains("error"))
    }
}

#[async_trait::async_trait]
impl<S: Sandboxed> Analyzed for StaticAnalyzer<S> {
    type Error = AnalysisError;

    #[instrument(skip(self, files, cancel), fields(project_id, language = %language))]
    async fn analyze(
        &self,
        project_id: &str,
        language: Language,
        files: &[ProjectFile],
        cancel: CancelToken,
    ) -> Result<StaticAnalysisResult, AnalysisError> {
        let syntax_errors: Vec<_> = files.iter().flat_map(check_brackets).collect();
        if !syntax_errors.is_empty() {
            return Ok(StaticAnalysisResult {
                syntax_valid: false,
                syntax_errors,
                lint_errors: Vec::new(),
                lint_output: String::new(),
                overall_score: 0,
                passes_gate: false,
            });
        }

        let request = ExecutionRequest {
            project_id: project_id.to_string(),
            language,
            files: files.to_vec(),
            entry_point: None,
            phase: ExecutionPhase::StaticAnalysis,
            timeout_seconds: LINT_TIMEOUT_SECS,
            allow_network: false,
            env: Vec::new(),
        };

        let result = self
            .sandbox
            .execute(request, cancel)
            .await
            .map_err(|e| AnalysisError::Sandbox(e.to_string()))?;

        let lint_output = format!("{}{}", result.stdout, result.stderr);
        let overall_score = Self::score(&result.errors);
        let passes_gate = Self::passes_gate(&result.errors);

        Ok(StaticAnalysisResult {
            syntax_valid: true,
            syntax_errors: Vec::new(),
            lint_errors: result.errors,
            lint_output,
            overall_score,
            passes_gate,
        })
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
