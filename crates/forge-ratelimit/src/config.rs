// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Rate/cost accounting configuration.

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests_per_minute: u64,
    pub max_requests_per_hour: u64,
    pub max_concurrent_executions_per_project: i64,
    pub max_daily_cost_per_user: f64,
    pub max_daily_cost_per_project: f64,
    pub max_monthly_cost_per_user: f64,
    pub cost_per_token: f64,
    pub cost_per_iteration: f64,
    pub cost_per_sandbox_execution: f64,
    pub cost_per_execution_second: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests_per_minute: 10,
            max_requests_per_hour: 100,
            max_concurrent_executions_per_project: 5,
            max_daily_cost_per_user: 50.0,
            max_daily_cost_per_project: 200.0,
            max_monthly_cost_per_user: 1_000.0,
            cost_per_token: 0.000_002,
            cost_per_iteration: 0.01,
            cost_per_sandbox_execution: 0.02,
            cost_per_execution_second: 0.001,
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

impl RateLimitConfig {
    /// Overlay `FORGE_RATELIMIT_*` environment variables onto the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        env_override!(config, max_requests_per_minute, "FORGE_RATELIMIT_MAX_REQUESTS_PER_MINUTE");
        env_override!(config, max_requests_per_hour, "FORGE_RATELIMIT_MAX_REQUESTS_PER_HOUR");
        env_override!(
            config,
            max_concurrent_executions_per_project,
            "FORGE_RATELIMIT_MAX_CONCURRENT_EXECUTIONS_PER_PROJECT"
        );
        env_override!(config, max_daily_cost_per_user, "FORGE_RATELIMIT_MAX_DAILY_COST_PER_USER");
        env_override!(config, max_daily_cost_per_project, "FORGE_RATELIMIT_MAX_DAILY_COST_PER_PROJECT");
        env_override!(config, max_monthly_cost_per_user, "FORGE_RATELIMIT_MAX_MONTHLY_COST_PER_USER");
        env_override!(config, cost_per_token, "FORGE_RATELIMIT_COST_PER_TOKEN");
        env_override!(config, cost_per_iteration, "FORGE_RATELIMIT_COST_PER_ITERATION");
        env_override!(config, cost_per_sandbox_execution, "FORGE_RATELIMIT_COST_PER_SANDBOX_EXECUTION");
        env_override!(config, cost_per_execution_second, "FORGE_RATELIMIT_COST_PER_EXECUTION_SECOND");
        config
    }
}
