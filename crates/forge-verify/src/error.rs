// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Verify-local error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("verification clock unavailable: {0}")]
    Clock(String),
}
