// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Analysis-local error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("sandbox execution failed: {0}")]
    Sandbox(String),
    #[error("generated test file invalid: {0}")]
    InvalidTestFile(String),
}
