// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn clean_output_passes() {
    let result = check("Build succeeded\n1 file compiled", false, 10);
    assert!(result.passed);
}

#[test]
fn error_pattern_fails() {
    let result = check("src/main.rs:3: error: expected `;`", false, 10);
    assert!(!result.passed);
}

#[test]
fn build_failed_marker_fails() {
    let result = check("Build FAILED", false, 10);
    assert!(!result.passed);
}

#[test]
fn npm_err_marker_fails() {
    let result = check("npm ERR! code ELIFECYCLE", false, 10);
    assert!(!result.passed);
}

#[test]
fn warnings_over_max_do_not_fail_but_are_flagged() {
    let output = (0..5).map(|_| "warning: unused variable").collect::<Vec<_>>().join("\n");
    let result = check(&output, false, 2);
    assert!(result.passed);
    assert!(result.issues.iter().any(|i| i.severity == forge_core::IssueSeverity::Warning));
}

#[test]
fn upstream_build_errors_present_flag_fails_even_with_clean_output() {
    let result = check("", true, 10);
    assert!(!result.passed);
}
