// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `RateLimiter`: the concrete `RateLimited` capability.

use crate::config::RateLimitConfig;
use crate::error::RateLimitError;
use crate::stats::UsageStats;
use crate::windows::{ms_until_next_utc_midnight, utc_midnight_ms, utc_month_start_ms, utc_week_start_ms};
use forge_core::{Clock, CostEntry, PipelineResult, PipelinePhase, ProjectUsage, RateLimitDecision, RateLimited, UserUsage};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::instrument;

/// The four pipeline phases that invoke the sandbox, and so incur a
/// per-sandbox-execution cost.
fn is_sandbox_phase(phase: PipelinePhase) -> bool {
    matches!(
        phase,
        PipelinePhase::StaticAnalyze | PipelinePhase::Build | PipelinePhase::TestExecute | PipelinePhase::Execute
    )
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Per-(user, project) admission control and cost accounting. Owns all
/// usage counters exclusively.
pub struct RateLimiter<C: Clock> {
    config: RateLimitConfig,
    clock: C,
    users: Mutex<HashMap<String, UserUsage>>,
    projects: Mutex<HashMap<String, ProjectUsage>>,
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(config: RateLimitConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            users: Mutex::new(HashMap::new()),
            projects: Mutex::new(HashMap::new()),
        }
    }

    /// Windowed aggregates over the cost logs and request counts.
    pub fn stats(&self, project_id: &str, user_id: &str) -> UsageStats {
        let now = self.clock.epoch_ms();
        let minute_ago = now.saturating_sub(60_000);
        let hour_ago = now.saturating_sub(3_600_000);
        let day_ago = now.saturating_sub(24 * 60 * 60 * 1000);

        let (requests_last_minute, requests_last_hour, requests_last_day, user_cost_today, user_cost_this_week, user_cost_this_month) = {
            let users = self.users.lock();
            match users.get(user_id) {
                Some(usage) => (
                    usage.requests_since(minute_ago) as u64,
                    usage.requests_since(hour_ago) as u64,
                    usage.requests_since(day_ago) as u64,
                    usage.cost_since(utc_midnight_ms(now)),
                    usage.cost_since(utc_week_start_ms(now)),
                    usage.cost_since(utc_month_start_ms(now)),
                ),
                None => (0, 0, 0, 0.0, 0.0, 0.0),
            }
        };

        let (project_cost_today, project_cost_this_week, project_cost_this_month, active_executions) = {
            let projects = self.projects.lock();
            match projects.get(project_id) {
                Some(usage) => (
                    usage.cost_since(utc_midnight_ms(now)),
                    usage.cost_since(utc_week_start_ms(now)),
                    usage.cost_since(utc_month_start_ms(now)),
                    usage.active_executions,
                ),
                None => (0.0, 0.0, 0.0, 0),
            }
        };

        UsageStats {
            requests_last_minute,
            requests_last_hour,
            requests_last_day,
            user_cost_today,
            user_cost_this_week,
            user_cost_this_month,
            project_cost_today,
            project_cost_this_week,
            project_cost_this_month,
            active_executions,
        }
    }

    /// Remove a project's counters entirely.
    pub fn reset(&self, project_id: &str) {
        self.projects.lock().remove(project_id);
    }
}

impl<C: Clock> RateLimited for RateLimiter<C> {
    type Error = RateLimitError;

    #[instrument(skip(self), fields(project_id, user_id))]
    fn check(&self, project_id: &str, user_id: &str) -> Result<RateLimitDecision, RateLimitError> {
        let now = self.clock.epoch_ms();

        let mut users = self.users.lock();
        let user = users.entry(user_id.to_string()).or_default();
        user.prune(now);

        let minute_count = user.requests_since(now.saturating_sub(60_000));
        if minute_count as u64 >= self.config.max_requests_per_minute {
            return Ok(deny(
                format!(
                    "rate limit exceeded: max {} requests per minute",
                    self.config.max_requests_per_minute
                ),
                60,
            ));
        }

        let hour_count = user.requests_since(now.saturating_sub(3_600_000));
        if hour_count as u64 >= self.config.max_requests_per_hour {
            return Ok(deny(
                format!("rate limit exceeded: max {} requests per hour", self.config.max_requests_per_hour),
                3600,
            ));
        }

        let user_cost_today = user.cost_since(utc_midnight_ms(now));
        if user_cost_today >= self.config.max_daily_cost_per_user {
            return Ok(deny(
                format!("daily cost limit of {:.2} exceeded for user", self.config.max_daily_cost_per_user),
                ms_until_next_utc_midnight(now) / 1000,
            ));
        }

        let mut projects = self.projects.lock();
        let project = projects.entry(project_id.to_string()).or_default();
        project.prune(now);

        let project_cost_today = project.cost_since(utc_midnight_ms(now));
        if project_cost_today >= self.config.max_daily_cost_per_project {
            return Ok(deny(
                format!("daily cost limit of {:.2} exceeded for project", self.config.max_daily_cost_per_project),
                ms_until_next_utc_midnight(now) / 1000,
            ));
        }

        if project.active_executions >= self.config.max_concurrent_executions_per_project {
            return Ok(deny(
                format!(
                    "concurrent execution limit of {} reached for project",
                    self.config.max_concurrent_executions_per_project
                ),
                10,
            ));
        }

        user.request_timestamps_ms.push(now);
        project.active_executions += 1;

        let remaining_requests = self.config.max_requests_per_minute.saturating_sub(minute_count as u64 + 1);
        let remaining_daily_cost = (self.config.max_daily_cost_per_user - user_cost_today).max(0.0);

        Ok(RateLimitDecision {
            allowed: true,
            message: None,
            retry_after_seconds: None,
            remaining_requests,
            remaining_daily_cost,
        })
    }

    #[instrument(skip(self, result), fields(project_id, user_id, iterations = result.iterations))]
    fn record(&self, project_id: &str, user_id: &str, result: &PipelineResult) -> Result<f64, RateLimitError> {
        let sandbox_phase_count = result.phases.iter().filter(|p| is_sandbox_phase(p.phase)).count() as u64;
        let tokens_total: u64 = result.phases.iter().map(|p| p.tokens_used).sum();
        let duration_secs = result.total_duration_ms.unwrap_or(0) as f64 / 1000.0;

        let cost = round4(
            result.iterations as f64 * self.config.cost_per_iteration
                + tokens_total as f64 * self.config.cost_per_token
                + duration_secs * self.config.cost_per_execution_second
                + sandbox_phase_count as f64 * self.config.cost_per_sandbox_execution,
        );

        let now = self.clock.epoch_ms();
        let entry = CostEntry { timestamp_ms: now, amount: cost };

        {
            let mut users = self.users.lock();
            let user = users.entry(user_id.to_string()).or_default();
            user.cost_entries.push(entry);
            user.prune(now);
        }

        {
            let mut projects = self.projects.lock();
            let project = projects.entry(project_id.to_string()).or_default();
            project.cost_entries.push(entry);
            if project.active_executions > 0 {
                project.active_executions -= 1;
            }
            project.prune(now);
        }

        Ok(cost)
    }
}

fn deny(message: String, retry_after_seconds: u64) -> RateLimitDecision {
    RateLimitDecision {
        allowed: false,
        message: Some(message),
        retry_after_seconds: Some(retry_after_seconds),
        remaining_requests: 0,
        remaining_daily_cost: 0.0,
    }
}

#[cfg(test)]
#[path = "limiter_tests.rs"]
mod tests;
