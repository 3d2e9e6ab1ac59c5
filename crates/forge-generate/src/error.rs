// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Generate-local error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("code generation failed: {0}")]
    Provider(String),
}
