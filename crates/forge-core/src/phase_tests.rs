// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn pass_rate_is_zero_with_no_tests() {
    let results = TestResults::default();
    assert_eq!(results.pass_rate(), 0.0);
}

#[test]
fn pass_rate_computes_percentage() {
    let results = TestResults {
        total: 4,
        passed: 3,
        failed: 1,
        skipped: 0,
    };
    assert_eq!(results.pass_rate(), 75.0);
}

#[test]
fn phase_result_builder_sets_fields() {
    let errors = vec![ExecutionError::new(
        crate::error::ExecutionErrorType::Runtime,
        "boom",
    )];
    let result = PhaseResult::new(PipelinePhase::Build, false, 120, "build output")
        .with_errors(errors.clone())
        .with_tokens_used(42);
    assert!(!result.success);
    assert_eq!(result.duration_ms, 120);
    assert_eq!(result.errors, errors);
    assert_eq!(result.tokens_used, 42);
}
