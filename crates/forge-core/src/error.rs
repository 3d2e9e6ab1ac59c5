// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Error taxonomy shared across sandbox, analysis, and verification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag for one structured diagnostic emitted by the sandbox, analyzer, or
/// pipeline driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionErrorType {
    Timeout,
    Internal,
    Lint,
    SyntaxError,
    CompileError,
    ImportError,
    ModuleNotFoundError,
    Runtime,
    GenerationError,
    Exception,
}

impl ExecutionErrorType {
    /// The set of types that must never be retried.
    const NON_RETRYABLE: [Self; 4] = [
        Self::SyntaxError,
        Self::ImportError,
        Self::ModuleNotFoundError,
        Self::CompileError,
    ];

    /// Whether a failure carrying this type should be retried by
    /// `SandboxExecutor::execute_with_retry`.
    pub fn is_retryable(self) -> bool {
        !Self::NON_RETRYABLE.contains(&self)
    }
}

impl fmt::Display for ExecutionErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Timeout => "Timeout",
            Self::Internal => "Internal",
            Self::Lint => "Lint",
            Self::SyntaxError => "SyntaxError",
            Self::CompileError => "CompileError",
            Self::ImportError => "ImportError",
            Self::ModuleNotFoundError => "ModuleNotFoundError",
            Self::Runtime => "Runtime",
            Self::GenerationError => "GenerationError",
            Self::Exception => "Exception",
        };
        write!(f, "{s}")
    }
}

/// One structured diagnostic (compile error, lint finding, runtime
/// exception, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionError {
    #[serde(rename = "type")]
    pub error_type: ExecutionErrorType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl ExecutionError {
    pub fn new(error_type: ExecutionErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            file: None,
            line: None,
            column: None,
            code: None,
            stack_trace: None,
        }
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Whether this particular error should block a retry attempt. A failure
    /// is non-retryable when its type, or its message text, matches one of
    /// the terminal failure classes.
    pub fn is_non_retryable(&self) -> bool {
        const TERMINAL_SUBSTRINGS: [&str; 4] =
            ["SyntaxError", "ImportError", "ModuleNotFoundError", "CompileError"];
        !self.error_type.is_retryable()
            || TERMINAL_SUBSTRINGS
                .iter()
                .any(|needle| self.message.contains(needle))
    }

    /// Render as `[type] file:line: message` (truncated stack trace appended),
    /// the format used to build the self-correction prompt tail.
    pub fn render_for_prompt(&self, max_stack_chars: usize) -> String {
        let location = match (&self.file, self.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file.clone(),
            _ => "<unknown>".to_string(),
        };
        let mut rendered = format!("[{}] {}: {}", self.error_type, location, self.message);
        if let Some(stack) = &self.stack_trace {
            let truncated: String = stack.chars().take(max_stack_chars).collect();
            rendered.push_str(&format!("\n{truncated}"));
        }
        rendered
    }
}

/// Severity of a verification issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
