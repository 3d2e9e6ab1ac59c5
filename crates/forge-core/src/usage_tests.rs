// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn user_usage_prunes_old_request_timestamps() {
    let mut usage = UserUsage {
        request_timestamps_ms: vec![0, REQUEST_RETENTION_MS, REQUEST_RETENTION_MS + 5_000],
        cost_entries: vec![],
    };
    usage.prune(REQUEST_RETENTION_MS + 5_000);
    assert_eq!(usage.request_timestamps_ms.len(), 2);
}

#[test]
fn user_usage_prunes_old_cost_entries() {
    let mut usage = UserUsage {
        request_timestamps_ms: vec![],
        cost_entries: vec![
            CostEntry {
                timestamp_ms: 0,
                amount: 1.0,
            },
            CostEntry {
                timestamp_ms: COST_RETENTION_MS + 1,
                amount: 2.0,
            },
        ],
    };
    usage.prune(COST_RETENTION_MS + 1);
    assert_eq!(usage.cost_entries.len(), 1);
    assert_eq!(usage.cost_entries[0].amount, 2.0);
}

#[test]
fn cost_since_sums_matching_entries() {
    let usage = UserUsage {
        request_timestamps_ms: vec![],
        cost_entries: vec![
            CostEntry {
                timestamp_ms: 100,
                amount: 1.5,
            },
            CostEntry {
                timestamp_ms: 200,
                amount: 2.5,
            },
        ],
    };
    assert_eq!(usage.cost_since(150), 2.5);
    assert_eq!(usage.cost_since(0), 4.0);
}

#[test]
fn project_usage_rejects_negative_active_executions() {
    let usage = ProjectUsage {
        cost_entries: vec![],
        active_executions: -1,
    };
    assert!(!usage.is_valid());
}

#[test]
fn project_usage_accepts_zero_active_executions() {
    let usage = ProjectUsage::default();
    assert!(usage.is_valid());
}
