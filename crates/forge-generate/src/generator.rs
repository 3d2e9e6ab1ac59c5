// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `CodeGenerator` collaborator interface.
//!
//! This crate never implements an LLM provider: the
//! code-generation step is consumed only through this trait.

use crate::error::GenerationError;
use async_trait::async_trait;
use forge_core::{Language, ProjectFile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One request to synthesize or revise a set of source files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub project_id: String,
    pub language: Language,
    pub prompt: String,
    pub existing_files: Vec<ProjectFile>,
    pub context: HashMap<String, String>,
}

/// The generator's response. `files` is authoritative: the pipeline never
/// parses inline code fences out of `explanation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub tokens_used: u64,
}

/// Capability: synthesize or revise source files from a natural-language
/// prompt plus accumulated error history.
#[async_trait]
pub trait CodeGenerator: Send + Sync + 'static {
    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, GenerationError>;
}
