// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Security check: per-line regex scan for secrets, SQL injection, and
//! dangerous primitives.

use forge_core::{Issue, IssueSeverity, ProjectFile, VerificationCategory};
use regex::Regex;
use std::sync::OnceLock;

#[allow(clippy::expect_used)]
fn secret_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)(api[_-]?key|password|secret|token)\s*[:=]\s*['"][^'"\s]{6,}['"]|bearer\s+[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+|AKIA[0-9A-Z]{16}"#,
        )
        .expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn sql_injection_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(select|insert|update|delete|drop)\b[^;"']*['"]\s*\+|f['"].*\b(select|insert|update|delete|drop)\b.*\{|%s["']?\s*%\s*\(.*\b(select|insert|update|delete|drop)\b"#)
            .expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn dangerous_primitive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\beval\(|\bexec\(|\bcompile\(|shell\s*=\s*True|Process\.Start\(|Runtime\.(getRuntime\(\)\.)?exec\(")
            .expect("constant regex pattern is valid")
    })
}

/// Scan every file line by line, producing one issue per matching line.
pub fn scan(files: &[ProjectFile]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for file in files {
        for (idx, line) in file.content.lines().enumerate() {
            let line_no = (idx + 1) as u32;
            if secret_re().is_match(line) {
                issues.push(
                    Issue::new(VerificationCategory::Security, IssueSeverity::Critical, "hardcoded secret detected")
                        .at(file.path.clone(), line_no),
                );
            }
            if sql_injection_re().is_match(line) {
                issues.push(
                    Issue::new(VerificationCategory::Security, IssueSeverity::Error, "possible SQL injection via string concatenation")
                        .at(file.path.clone(), line_no),
                );
            }
            if dangerous_primitive_re().is_match(line) {
                issues.push(
                    Issue::new(VerificationCategory::Security, IssueSeverity::Warning, "use of a dangerous primitive")
                        .at(file.path.clone(), line_no),
                );
            }
        }
    }
    issues
}

#[cfg(test)]
#[path = "security_tests.rs"]
mod tests;
