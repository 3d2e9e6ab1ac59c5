// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `VerificationGate`: the concrete `Verified` capability.

use crate::build_check;
use crate::config::VerifyConfig;
use crate::error::VerifyError;
use crate::quality;
use crate::runtime_check;
use crate::security;
use crate::test_check;
use forge_core::{CheckResult, Issue, VerificationInput, VerificationResult, Verified};

/// Weight assigned to each check when present, normalized over the weights
/// of checks that actually ran.
const WEIGHT_QUALITY: f64 = 0.30;
const WEIGHT_TESTS: f64 = 0.30;
const WEIGHT_SECURITY: f64 = 0.20;
const WEIGHT_BUILD: f64 = 0.15;
const WEIGHT_RUNTIME: f64 = 0.05;

/// Deterministic, weighted pass/fail verdict over pipeline artifacts.
pub struct VerificationGate {
    config: VerifyConfig,
}

impl VerificationGate {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }
}

impl Default for VerificationGate {
    fn default() -> Self {
        Self::new(VerifyConfig::default())
    }
}

impl Verified for VerificationGate {
    type Error = VerifyError;

    fn verify(&self, input: VerificationInput<'_>, now_ms: u64) -> Result<VerificationResult, VerifyError> {
        let quality = quality::check(input.analysis, &self.config);
        let tests = test_check::check(input.test_results, self.config.min_test_pass_rate, input.require_tests);
        let security = {
            let issues = security::scan(input.files);
            let has_critical = issues.iter().any(|i| i.severity == forge_core::IssueSeverity::Critical);
            let penalty: u32 = issues
                .iter()
                .map(|i| match i.severity {
                    forge_core::IssueSeverity::Critical => 40,
                    forge_core::IssueSeverity::Error => 15,
                    forge_core::IssueSeverity::Warning => 5,
                    forge_core::IssueSeverity::Info => 1,
                })
                .sum();
            CheckResult {
                category: forge_core::VerificationCategory::Security,
                passed: !has_critical,
                score: (100u32.saturating_sub(penalty)).min(100) as u8,
                issues,
            }
        };
        let build = build_check::check(input.build_output, input.build_errors_present, self.config.max_build_warnings);
        let runtime = runtime_check::check(input.runtime_errors);

        let checks = vec![quality, tests, security, build, runtime];

        let weight_for = |category: forge_core::VerificationCategory| match category {
            forge_core::VerificationCategory::Quality => WEIGHT_QUALITY,
            forge_core::VerificationCategory::Tests => WEIGHT_TESTS,
            forge_core::VerificationCategory::Security => WEIGHT_SECURITY,
            forge_core::VerificationCategory::Build => WEIGHT_BUILD,
            forge_core::VerificationCategory::Runtime => WEIGHT_RUNTIME,
        };

        let total_weight: f64 = checks.iter().map(|c| weight_for(c.category)).sum();
        let weighted_sum: f64 = checks.iter().map(|c| weight_for(c.category) * c.score as f64).sum();
        let score = if total_weight > 0.0 {
            (weighted_sum / total_weight).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        let all_issues: Vec<Issue> = checks.iter().flat_map(|c| c.issues.clone()).collect();
        let no_critical = all_issues.iter().all(|i| i.severity != forge_core::IssueSeverity::Critical);

        let quality_check = checks.iter().find(|c| c.category == forge_core::VerificationCategory::Quality);
        let build_check_result = checks.iter().find(|c| c.category == forge_core::VerificationCategory::Build);
        let tests_check_result = checks.iter().find(|c| c.category == forge_core::VerificationCategory::Tests);

        let passed = quality_check.is_some_and(|c| c.passed)
            && build_check_result.is_some_and(|c| c.passed)
            && no_critical
            && (!input.require_tests || tests_check_result.is_some_and(|c| c.passed));

        Ok(VerificationResult {
            project_id: input.project_id.to_string(),
            validated_at_ms: now_ms,
            passed,
            score,
            checks,
            issues: all_issues,
        })
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
