// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use forge_core::ExecutionErrorType;

#[test]
fn no_errors_passes() {
    let result = check(&[]);
    assert!(result.passed);
    assert_eq!(result.score, 100);
}

#[test]
fn runtime_error_fails() {
    let errors = vec![ExecutionError::new(ExecutionErrorType::Runtime, "NullPointerException")];
    let result = check(&errors);
    assert!(!result.passed);
}

#[test]
fn exception_type_is_aggregated() {
    let errors = vec![ExecutionError::new(ExecutionErrorType::Exception, "boom")];
    let result = check(&errors);
    assert_eq!(result.issues.len(), 1);
}

#[test]
fn non_runtime_error_types_are_ignored() {
    let errors = vec![ExecutionError::new(ExecutionErrorType::SyntaxError, "unexpected token")];
    let result = check(&errors);
    assert!(result.passed);
    assert!(result.issues.is_empty());
}
