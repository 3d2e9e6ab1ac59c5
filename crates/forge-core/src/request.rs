// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Inbound request to the pipeline.

use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// A single source file supplied with or produced during a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Path relative to the workspace root. Never absolute, never containing
    /// a `..` segment (enforced by [`ProjectFile::new`]).
    pub path: String,
    pub content: String,
}

/// Errors constructing or validating request data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("file path must not be absolute: {0}")]
    AbsolutePath(String),
    #[error("file path must not escape the workspace: {0}")]
    ParentEscape(String),
    #[error("user_id must not be empty")]
    EmptyUserId,
    #[error("project_id must not be empty")]
    EmptyProjectId,
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("max_iterations must be at least 1")]
    MaxIterationsTooLow,
}

impl ProjectFile {
    /// Construct a file, rejecting absolute paths or `..` segments.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Result<Self, RequestError> {
        let path = path.into();
        validate_relative_path(&path)?;
        Ok(Self {
            path,
            content: content.into(),
        })
    }
}

fn validate_relative_path(path: &str) -> Result<(), RequestError> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(RequestError::AbsolutePath(path.to_string()));
    }
    if p.components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(RequestError::ParentEscape(path.to_string()));
    }
    Ok(())
}

/// A request to run the closed-loop pipeline once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    pub project_id: String,
    pub user_id: String,
    pub language: String,
    pub prompt: String,
    pub files: Vec<ProjectFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub run_after_build: bool,
    #[serde(default)]
    pub context: HashMap<String, String>,
    pub max_iterations: u32,
}

impl PipelineRequest {
    /// Validate the request-level invariants. Does not re-validate
    /// individual `ProjectFile` paths since those are checked at
    /// construction time.
    pub fn validate(&self) -> Result<Language, RequestError> {
        if self.user_id.trim().is_empty() {
            return Err(RequestError::EmptyUserId);
        }
        if self.project_id.trim().is_empty() {
            return Err(RequestError::EmptyProjectId);
        }
        if self.max_iterations < 1 {
            return Err(RequestError::MaxIterationsTooLow);
        }
        Language::parse(&self.language)
            .ok_or_else(|| RequestError::UnsupportedLanguage(self.language.clone()))
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
