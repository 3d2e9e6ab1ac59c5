// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Verification gate artifacts.

use crate::error::IssueSeverity;
use crate::status::VerificationCategory;
use serde::{Deserialize, Serialize};

/// One finding surfaced by a verification check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub category: VerificationCategory,
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Issue {
    pub fn new(
        category: VerificationCategory,
        severity: IssueSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

/// Outcome of one of the five verification checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub category: VerificationCategory,
    pub passed: bool,
    pub score: u8,
    pub issues: Vec<Issue>,
}

impl CheckResult {
    pub fn has_critical(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Critical)
    }
}

/// Final weighted verdict produced once per pipeline completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub project_id: String,
    pub validated_at_ms: u64,
    pub passed: bool,
    pub score: u8,
    pub checks: Vec<CheckResult>,
    pub issues: Vec<Issue>,
}

impl VerificationResult {
    /// Invariant: `passed` implies no Critical issue anywhere and
    /// every check that ran, passed.
    pub fn upholds_pass_invariant(&self) -> bool {
        if !self.passed {
            return true;
        }
        let no_critical = self.issues.iter().all(|i| i.severity != IssueSeverity::Critical);
        let all_checks_passed = self.checks.iter().all(|c| c.passed);
        no_critical && all_checks_passed
    }
}

#[cfg(test)]
#[path = "verification_tests.rs"]
mod tests;
