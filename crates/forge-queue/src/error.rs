// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Error taxonomy for queue admission and lookup failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("enqueue cancelled before a queue slot became available")]
    EnqueueCancelled,
    #[error("queue is shutting down")]
    ShuttingDown,
}
