// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Sandbox-local error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("invalid file path: {0}")]
    InvalidPath(String),
    #[error("workspace io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("container launch failed: {0}")]
    LaunchFailed(String),
    #[error("container runtime error: {0}")]
    Runtime(String),
    #[error("execution cancelled")]
    Cancelled,
    #[error("semaphore closed")]
    SemaphoreClosed,
}
