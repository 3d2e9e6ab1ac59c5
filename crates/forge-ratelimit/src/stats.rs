// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Windowed usage aggregates returned by `RateLimiter::stats`.

/// Snapshot of rolling request counts and cost sums for one (user, project)
/// pair. Readers may observe a just-completed request without its cost yet
/// recorded, or vice versa — this is acceptable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageStats {
    pub requests_last_minute: u64,
    pub requests_last_hour: u64,
    pub requests_last_day: u64,
    pub user_cost_today: f64,
    pub user_cost_this_week: f64,
    pub user_cost_this_month: f64,
    pub project_cost_today: f64,
    pub project_cost_this_week: f64,
    pub project_cost_this_month: f64,
    pub active_executions: i64,
}
