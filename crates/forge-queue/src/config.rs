// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Queue and worker-pool tunables.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Bounded FIFO channel capacity.
    pub capacity: usize,
    /// Fixed number of worker tasks pulling from the channel.
    pub worker_count: usize,
    /// How long a terminal job and its result are kept before the retention
    /// sweep removes them.
    pub retention: Duration,
    /// Per-delivery timeout for the best-effort webhook POST.
    pub webhook_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            worker_count: 3,
            retention: Duration::from_secs(24 * 60 * 60),
            webhook_timeout: Duration::from_secs(5),
        }
    }
}

macro_rules! env_override {
    ($config:ident, $field:ident, $var:expr) => {
        if let Ok(v) = std::env::var($var) {
            if let Ok(parsed) = v.parse() {
                $config.$field = parsed;
            }
        }
    };
}

impl QueueConfig {
    /// Overlay `FORGE_QUEUE_*` environment variables onto the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        env_override!(config, capacity, "FORGE_QUEUE_CAPACITY");
        env_override!(config, worker_count, "FORGE_QUEUE_WORKER_COUNT");

        if let Ok(v) = std::env::var("FORGE_QUEUE_RETENTION_SECS") {
            if let Ok(secs) = v.parse() {
                config.retention = Duration::from_secs(secs);
            }
        }
        if let Ok(v) = std::env::var("FORGE_QUEUE_WEBHOOK_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                config.webhook_timeout = Duration::from_secs(secs);
            }
        }
        config
    }
}
