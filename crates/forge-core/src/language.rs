// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Supported source languages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the languages the sandbox and static analyzer understand.
///
/// `javascript`, `typescript`, and `node` all map to [`Language::JavaScript`]
/// since the entrypoint contract treats them identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Python,
    JavaScript,
    CSharp,
    Java,
    Go,
    Rust,
    Ruby,
    Php,
}

impl Language {
    /// Parse a free-form language string as given in `PipelineRequest.language`.
    ///
    /// Returns `None` for anything not in the supported set; callers fall back
    /// to the "unsupported language" entrypoint behavior.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Self::Python),
            "javascript" | "typescript" | "node" | "js" | "ts" | "nodejs" => {
                Some(Self::JavaScript)
            }
            "csharp" | "dotnet" | "c#" => Some(Self::CSharp),
            "java" => Some(Self::Java),
            "go" | "golang" => Some(Self::Go),
            "rust" | "rs" => Some(Self::Rust),
            "ruby" | "rb" => Some(Self::Ruby),
            "php" => Some(Self::Php),
            _ => None,
        }
    }

    /// Canonical base container image reference for this language.
    pub fn default_base_image(self) -> &'static str {
        match self {
            Self::Python => "python:3.12-slim",
            Self::JavaScript => "node:20-slim",
            Self::CSharp => "mcr.microsoft.com/dotnet/sdk:8.0",
            Self::Java => "eclipse-temurin:21-jdk",
            Self::Go => "golang:1.22",
            Self::Rust => "rust:1.78-slim",
            Self::Ruby => "ruby:3.3-slim",
            Self::Php => "php:8.3-cli",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::CSharp => "csharp",
            Self::Java => "java",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Ruby => "ruby",
            Self::Php => "php",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[path = "language_tests.rs"]
mod tests;
