// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn missing_results_fails_when_required() {
    let result = check(None, 80.0, true);
    assert!(!result.passed);
}

#[test]
fn missing_results_passes_when_not_required() {
    let result = check(None, 80.0, false);
    assert!(result.passed);
}

#[test]
fn any_failure_fails_the_check() {
    let results = TestResults { total: 10, passed: 9, failed: 1, skipped: 0 };
    let result = check(Some(&results), 50.0, true);
    assert!(!result.passed);
}

#[test]
fn score_below_min_pass_rate_fails() {
    let results = TestResults { total: 10, passed: 5, failed: 0, skipped: 5 };
    let result = check(Some(&results), 80.0, true);
    assert!(!result.passed);
    assert_eq!(result.score, 50);
}

#[test]
fn all_passing_above_threshold_passes() {
    let results = TestResults { total: 10, passed: 10, failed: 0, skipped: 0 };
    let result = check(Some(&results), 80.0, true);
    assert!(result.passed);
    assert_eq!(result.score, 100);
}
