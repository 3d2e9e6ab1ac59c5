// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! forge-queue: bounded job admission, a fixed worker pool running
//! `AgentPipeline` jobs to completion, retention, and best-effort webhook
//! delivery.

pub mod config;
pub mod error;
pub mod queue;
pub mod webhook;
pub mod worker;

pub use config::QueueConfig;
pub use error::QueueError;
pub use queue::JobQueue;
pub use webhook::WebhookPayload;
pub use worker::spawn_worker_pool;
