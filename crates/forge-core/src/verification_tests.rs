// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

fn check(category: VerificationCategory, passed: bool) -> CheckResult {
    CheckResult {
        category,
        passed,
        score: if passed { 100 } else { 0 },
        issues: vec![],
    }
}

#[test]
fn has_critical_detects_critical_issue() {
    let check = CheckResult {
        category: VerificationCategory::Security,
        passed: false,
        score: 0,
        issues: vec![Issue::new(
            VerificationCategory::Security,
            IssueSeverity::Critical,
            "hardcoded secret",
        )],
    };
    assert!(check.has_critical());
}

#[test]
fn pass_invariant_holds_when_not_passed() {
    let result = VerificationResult {
        project_id: "p".into(),
        validated_at_ms: 0,
        passed: false,
        score: 10,
        checks: vec![check(VerificationCategory::Build, false)],
        issues: vec![],
    };
    assert!(result.upholds_pass_invariant());
}

#[test]
fn pass_invariant_violated_by_critical_issue() {
    let result = VerificationResult {
        project_id: "p".into(),
        validated_at_ms: 0,
        passed: true,
        score: 90,
        checks: vec![check(VerificationCategory::Quality, true)],
        issues: vec![Issue::new(
            VerificationCategory::Security,
            IssueSeverity::Critical,
            "secret",
        )],
    };
    assert!(!result.upholds_pass_invariant());
}

#[test]
fn pass_invariant_holds_for_clean_pass() {
    let result = VerificationResult {
        project_id: "p".into(),
        validated_at_ms: 0,
        passed: true,
        score: 95,
        checks: vec![
            check(VerificationCategory::Quality, true),
            check(VerificationCategory::Build, true),
        ],
        issues: vec![],
    };
    assert!(result.upholds_pass_invariant());
}
