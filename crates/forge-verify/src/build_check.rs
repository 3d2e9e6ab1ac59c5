// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Build check: scans build output for error-level patterns.

use forge_core::{CheckResult, Issue, IssueSeverity, VerificationCategory};
use regex::Regex;
use std::sync::OnceLock;

#[allow(clippy::expect_used)]
fn error_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)error[^:]*:|build failed|failure:|fatal error|npm err!")
            .expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn warning_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bwarning\b").expect("constant regex pattern is valid"))
}

pub fn check(build_output: &str, build_errors_present: bool, max_build_warnings: u32) -> CheckResult {
    let mut issues = Vec::new();
    let mut failed = build_errors_present;

    for line in build_output.lines() {
        if error_re().is_match(line) {
            failed = true;
            issues.push(Issue::new(VerificationCategory::Build, IssueSeverity::Error, line.trim().to_string()));
        }
    }

    let warning_count = build_output.lines().filter(|l| warning_re().is_match(l)).count() as u32;
    if warning_count > max_build_warnings {
        issues.push(Issue::new(
            VerificationCategory::Build,
            IssueSeverity::Warning,
            format!("{warning_count} build warnings exceeds the configured maximum of {max_build_warnings}"),
        ));
    }

    let score = if failed { 0 } else { (100u32.saturating_sub(warning_count.min(100))) as u8 };

    CheckResult {
        category: VerificationCategory::Build,
        passed: !failed,
        score,
        issues,
    }
}

#[cfg(test)]
#[path = "build_check_tests.rs"]
mod tests;
