// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Driver-level tunables. The hard ceilings
//! `MAX_TOTAL_ITERATIONS` and `MAX_SELF_CORRECTION_ATTEMPTS` live in
//! `forge_core::result` since `PipelineResult::upholds_invariants` checks
//! against them; this config only carries the tunables the driver itself
//! owns.

use forge_core::{MAX_SELF_CORRECTION_ATTEMPTS, MAX_TOTAL_ITERATIONS};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hard ceiling on loop iterations. Capped at `MAX_TOTAL_ITERATIONS`.
    pub max_total_iterations: u32,
    /// Hard ceiling on self-correction attempts per failing-phase class.
    pub max_self_correction_attempts: u32,
    /// How many of the most recent accumulated errors are rendered into the
    /// self-correction prompt tail.
    pub error_history_tail: usize,
    /// Max characters of a stack trace rendered into the prompt.
    pub max_stack_chars: usize,
    pub build_timeout_secs: u64,
    pub test_timeout_secs: u64,
    pub run_timeout_secs: u64,
    /// Retries handed to `Sandboxed::execute_with_retry` per phase.
    pub sandbox_max_retries: u32,
    /// Whether the verification gate requires a passing test check.
    pub require_tests: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_total_iterations: MAX_TOTAL_ITERATIONS,
            max_self_correction_attempts: MAX_SELF_CORRECTION_ATTEMPTS,
            error_history_tail: 10,
            max_stack_chars: 2000,
            build_timeout_secs: 120,
            test_timeout_secs: 120,
            run_timeout_secs: 30,
            sandbox_max_retries: 2,
            require_tests: true,
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

impl PipelineConfig {
    /// Overlay `FORGE_PIPELINE_*` environment variables onto the defaults.
    /// `max_total_iterations` and `max_self_correction_attempts` are clamped
    /// to the hard ceilings so an operator cannot raise them past the compiled-in caps.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        env_override!(config, max_total_iterations, "FORGE_PIPELINE_MAX_TOTAL_ITERATIONS");
        env_override!(config, max_self_correction_attempts, "FORGE_PIPELINE_MAX_SELF_CORRECTION_ATTEMPTS");
        env_override!(config, error_history_tail, "FORGE_PIPELINE_ERROR_HISTORY_TAIL");
        env_override!(config, max_stack_chars, "FORGE_PIPELINE_MAX_STACK_CHARS");
        env_override!(config, build_timeout_secs, "FORGE_PIPELINE_BUILD_TIMEOUT_SECS");
        env_override!(config, test_timeout_secs, "FORGE_PIPELINE_TEST_TIMEOUT_SECS");
        env_override!(config, run_timeout_secs, "FORGE_PIPELINE_RUN_TIMEOUT_SECS");
        env_override!(config, sandbox_max_retries, "FORGE_PIPELINE_SANDBOX_MAX_RETRIES");
        env_override!(config, require_tests, "FORGE_PIPELINE_REQUIRE_TESTS");
        config.max_total_iterations = config.max_total_iterations.min(MAX_TOTAL_ITERATIONS);
        config.max_self_correction_attempts = config.max_self_correction_attempts.min(MAX_SELF_CORRECTION_ATTEMPTS);
        config
    }
}
