// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Diagnostic parsing: combined container output → structured
//! `ExecutionError` list.

use forge_core::{ExecutionError, ExecutionErrorType};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Deserialize)]
struct LintEntry {
    message: String,
    path: Option<String>,
    line: Option<u32>,
    column: Option<u32>,
}

#[allow(clippy::expect_used)]
fn python_traceback() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"File "(?P<path>[^"]+)", line (?P<line>\d+)"#).expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn js_diagnostic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<path>[^\s:]+\.(?:js|ts)):(?P<line>\d+):(?P<col>\d+)").expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn c_family_diagnostic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<path>[^\s(]+\.cs)\((?P<line>\d+),(?P<col>\d+)\): (?P<kind>error|warning) (?P<code>[^:]+): (?P<msg>.+)")
            .expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn go_diagnostic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<path>[^\s:]+\.go):(?P<line>\d+):(?P<col>\d+): (?P<msg>.+)").expect("constant regex pattern is valid")
    })
}

/// Parse combined container output into zero or more structured errors, per
/// the ordered-attempt contract: JSON lint array, then per-language regex
/// scan line by line, then a fallback `Runtime` error from stderr.
pub fn parse_diagnostics(stdout: &str, stderr: &str) -> Vec<ExecutionError> {
    let combined = if stdout.trim_start().starts_with('[') {
        stdout
    } else if stderr.trim_start().starts_with('[') {
        stderr
    } else {
        ""
    };

    if !combined.is_empty() {
        if let Ok(entries) = serde_json::from_str::<Vec<LintEntry>>(combined) {
            return entries
                .into_iter()
                .map(|entry| {
                    let mut err = ExecutionError::new(ExecutionErrorType::Lint, entry.message);
                    if let Some(path) = entry.path {
                        err = err.with_location(path, entry.line.unwrap_or(0), entry.column.unwrap_or(0));
                    }
                    err
                })
                .collect();
        }
    }

    let mut errors = Vec::new();
    for line in stdout.lines().chain(stderr.lines()) {
        if let Some(caps) = python_traceback().captures(line) {
            errors.push(
                ExecutionError::new(ExecutionErrorType::Runtime, line.trim().to_string()).with_location(
                    caps["path"].to_string(),
                    caps["line"].parse().unwrap_or(0),
                    0,
                ),
            );
        } else if let Some(caps) = js_diagnostic().captures(line) {
            errors.push(
                ExecutionError::new(ExecutionErrorType::Runtime, line.trim().to_string()).with_location(
                    caps["path"].to_string(),
                    caps["line"].parse().unwrap_or(0),
                    caps["col"].parse().unwrap_or(0),
                ),
            );
        } else if let Some(caps) = c_family_diagnostic().captures(line) {
            let error_type = if &caps["kind"] == "error" {
                ExecutionErrorType::CompileError
            } else {
                ExecutionErrorType::Lint
            };
            errors.push(
                ExecutionError::new(error_type, caps["msg"].to_string())
                    .with_location(
                        caps["path"].to_string(),
                        caps["line"].parse().unwrap_or(0),
                        caps["col"].parse().unwrap_or(0),
                    )
                    .with_code(caps["code"].to_string()),
            );
        } else if let Some(caps) = go_diagnostic().captures(line) {
            errors.push(
                ExecutionError::new(ExecutionErrorType::CompileError, caps["msg"].to_string()).with_location(
                    caps["path"].to_string(),
                    caps["line"].parse().unwrap_or(0),
                    caps["col"].parse().unwrap_or(0),
                ),
            );
        }
    }

    if errors.is_empty() && !stderr.trim().is_empty() {
        errors.push(ExecutionError::new(ExecutionErrorType::Runtime, stderr.trim().to_string()));
    }

    errors
}

/// Extract a stack trace as the contiguous tail of lines starting at the
/// first `Traceback`, `at `, or `   at ` marker.
pub fn extract_stack_trace(stdout: &str, stderr: &str) -> Option<String> {
    let combined: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let start = combined
        .iter()
        .position(|line| line.contains("Traceback") || line.contains("   at ") || line.contains("at "))?;
    let tail = combined[start..].join("\n");
    if tail.trim().is_empty() {
        None
    } else {
        Some(tail)
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
