// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Runtime check: aggregates `Runtime`/`Exception` errors surfaced by the
//! test phase into Error issues.

use forge_core::{CheckResult, ExecutionError, ExecutionErrorType, Issue, IssueSeverity, VerificationCategory};

pub fn check(runtime_errors: &[ExecutionError]) -> CheckResult {
    let relevant: Vec<&ExecutionError> = runtime_errors
        .iter()
        .filter(|e| matches!(e.error_type, ExecutionErrorType::Runtime | ExecutionErrorType::Exception))
        .collect();

    let issues: Vec<Issue> = relevant
        .iter()
        .map(|e| {
            let mut issue = Issue::new(VerificationCategory::Runtime, IssueSeverity::Error, e.message.clone());
            if let (Some(file), Some(line)) = (&e.file, e.line) {
                issue = issue.at(file.clone(), line);
            }
            issue
        })
        .collect();

    let passed = issues.is_empty();
    let score = if passed { 100 } else { (100u32.saturating_sub(20 * relevant.len() as u32)).min(100) as u8 };

    CheckResult {
        category: VerificationCategory::Runtime,
        passed,
        score,
        issues,
    }
}

#[cfg(test)]
#[path = "runtime_check_tests.rs"]
mod tests;
