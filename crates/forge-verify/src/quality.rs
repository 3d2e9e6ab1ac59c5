// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Quality check: requires a passing `StaticAnalysisResult` at or above the
//! configured minimum score.

use crate::config::VerifyConfig;
use forge_core::{CheckResult, ExecutionErrorType, Issue, IssueSeverity, StaticAnalysisResult, VerificationCategory};

pub fn check(analysis: Option<&StaticAnalysisResult>, config: &VerifyConfig) -> CheckResult {
    let Some(analysis) = analysis else {
        return CheckResult {
            category: VerificationCategory::Quality,
            passed: false,
            score: 0,
            issues: vec![Issue::new(
                VerificationCategory::Quality,
                IssueSeverity::Error,
                "no static analysis result available",
            )],
        };
    };

    let mut issues: Vec<Issue> = analysis
        .lint_errors
        .iter()
        .filter(|e| matches!(e.error_type, ExecutionErrorType::CompileError) || e.message.contains("error"))
        .map(|e| {
            let mut issue = Issue::new(VerificationCategory::Quality, IssueSeverity::Error, e.message.clone());
            if let (Some(file), Some(line)) = (&e.file, e.line) {
                issue = issue.at(file.clone(), line);
            }
            issue
        })
        .collect();

    for e in &analysis.syntax_errors {
        let mut issue = Issue::new(VerificationCategory::Quality, IssueSeverity::Critical, e.message.clone());
        if let (Some(file), Some(line)) = (&e.file, e.line) {
            issue = issue.at(file.clone(), line);
        }
        issues.push(issue);
    }

    let passed = analysis.syntax_valid && analysis.overall_score >= config.min_quality_score;

    CheckResult {
        category: VerificationCategory::Quality,
        passed,
        score: analysis.overall_score,
        issues,
    }
}

#[cfg(test)]
#[path = "quality_tests.rs"]
mod tests;
