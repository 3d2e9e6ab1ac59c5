// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Per-user / per-project usage counters.

use serde::{Deserialize, Serialize};

/// Retention window for request timestamps.
pub const REQUEST_RETENTION_MS: u64 = 24 * 60 * 60 * 1000;

/// Retention window for cost entries.
pub const COST_RETENTION_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// One billed amount recorded at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostEntry {
    pub timestamp_ms: u64,
    pub amount: f64,
}

/// Rolling usage counters for a single user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUsage {
    pub request_timestamps_ms: Vec<u64>,
    pub cost_entries: Vec<CostEntry>,
}

impl UserUsage {
    /// Drop request timestamps older than [`REQUEST_RETENTION_MS`] and cost
    /// entries older than [`COST_RETENTION_MS`], relative to `now_ms`.
    pub fn prune(&mut self, now_ms: u64) {
        let request_cutoff = now_ms.saturating_sub(REQUEST_RETENTION_MS);
        self.request_timestamps_ms.retain(|&t| t >= request_cutoff);
        let cost_cutoff = now_ms.saturating_sub(COST_RETENTION_MS);
        self.cost_entries.retain(|e| e.timestamp_ms >= cost_cutoff);
    }

    pub fn cost_since(&self, since_ms: u64) -> f64 {
        self.cost_entries
            .iter()
            .filter(|e| e.timestamp_ms >= since_ms)
            .map(|e| e.amount)
            .sum()
    }

    pub fn requests_since(&self, since_ms: u64) -> usize {
        self.request_timestamps_ms
            .iter()
            .filter(|&&t| t >= since_ms)
            .count()
    }
}

/// Rolling usage counters for a single project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUsage {
    pub cost_entries: Vec<CostEntry>,
    pub active_executions: i64,
}

impl ProjectUsage {
    pub fn prune(&mut self, now_ms: u64) {
        let cost_cutoff = now_ms.saturating_sub(COST_RETENTION_MS);
        self.cost_entries.retain(|e| e.timestamp_ms >= cost_cutoff);
    }

    pub fn cost_since(&self, since_ms: u64) -> f64 {
        self.cost_entries
            .iter()
            .filter(|e| e.timestamp_ms >= since_ms)
            .map(|e| e.amount)
            .sum()
    }

    /// Invariant: never goes negative.
    pub fn is_valid(&self) -> bool {
        self.active_executions >= 0
    }
}

#[cfg(test)]
#[path = "usage_tests.rs"]
mod tests;
