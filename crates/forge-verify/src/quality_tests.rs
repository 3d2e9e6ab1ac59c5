// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use forge_core::{ExecutionError, ExecutionErrorType};

fn analysis(overall_score: u8, syntax_valid: bool, lint_errors: Vec<ExecutionError>) -> StaticAnalysisResult {
    StaticAnalysisResult {
        syntax_valid,
        syntax_errors: Vec::new(),
        lint_errors,
        lint_output: String::new(),
        overall_score,
        passes_gate: syntax_valid,
    }
}

#[test]
fn missing_analysis_fails() {
    let result = check(None, &VerifyConfig::default());
    assert!(!result.passed);
}

#[test]
fn score_below_minimum_fails() {
    let a = analysis(50, true, Vec::new());
    let result = check(Some(&a), &VerifyConfig::default());
    assert!(!result.passed);
}

#[test]
fn invalid_syntax_fails_regardless_of_score() {
    let a = analysis(100, false, Vec::new());
    let result = check(Some(&a), &VerifyConfig::default());
    assert!(!result.passed);
}

#[test]
fn passing_score_with_valid_syntax_passes() {
    let a = analysis(90, true, Vec::new());
    let result = check(Some(&a), &VerifyConfig::default());
    assert!(result.passed);
}

#[test]
fn compile_error_lint_becomes_error_issue() {
    let a = analysis(70, true, vec![ExecutionError::new(ExecutionErrorType::CompileError, "bad type")]);
    let result = check(Some(&a), &VerifyConfig::default());
    assert!(result.issues.iter().any(|i| i.severity == IssueSeverity::Error));
}
