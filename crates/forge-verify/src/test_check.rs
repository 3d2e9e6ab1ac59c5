// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Tests check: aggregates the test-execution phase's `TestResults` into a
//! pass rate.

use forge_core::{CheckResult, Issue, IssueSeverity, TestResults, VerificationCategory};

pub fn check(test_results: Option<&TestResults>, min_pass_rate: f64, require_tests: bool) -> CheckResult {
    let Some(results) = test_results else {
        let passed = !require_tests;
        let mut issues = Vec::new();
        if require_tests {
            issues.push(Issue::new(
                VerificationCategory::Tests,
                IssueSeverity::Error,
                "tests are required but no test results were produced",
            ));
        }
        return CheckResult {
            category: VerificationCategory::Tests,
            passed,
            score: 0,
            issues,
        };
    };

    let mut issues = Vec::new();
    if results.failed > 0 {
        issues.push(Issue::new(
            VerificationCategory::Tests,
            IssueSeverity::Error,
            format!("{} of {} tests failed", results.failed, results.total),
        ));
    }

    let score = results.pass_rate().round().clamp(0.0, 100.0) as u8;
    let passed = results.failed == 0 && score as f64 >= min_pass_rate;

    CheckResult {
        category: VerificationCategory::Tests,
        passed,
        score,
        issues,
    }
}

#[cfg(test)]
#[path = "test_check_tests.rs"]
mod tests;
