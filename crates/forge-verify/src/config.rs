// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Verification-gate configuration.

/// Thresholds the five checks are evaluated against.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    pub min_quality_score: u8,
    pub min_test_pass_rate: f64,
    pub require_tests: bool,
    pub max_build_warnings: u32,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            min_quality_score: 70,
            min_test_pass_rate: 80.0,
            require_tests: true,
            max_build_warnings: 10,
        }
    }
}

impl VerifyConfig {
    /// Overlay `FORGE_VERIFY_*` environment variables onto the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("FORGE_VERIFY_MIN_QUALITY_SCORE") {
            if let Ok(parsed) = v.parse() {
                config.min_quality_score = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_VERIFY_MIN_TEST_PASS_RATE") {
            if let Ok(parsed) = v.parse() {
                config.min_test_pass_rate = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_VERIFY_REQUIRE_TESTS") {
            if let Ok(parsed) = v.parse() {
                config.require_tests = parsed;
            }
        }
        if let Ok(v) = std::env::var("FORGE_VERIFY_MAX_BUILD_WARNINGS") {
            if let Ok(parsed) = v.parse() {
                config.max_build_warnings = parsed;
            }
        }
        config
    }
}
