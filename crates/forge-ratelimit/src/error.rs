// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Rate-limiter-local error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("unknown project: {0}")]
    UnknownProject(String),
}
