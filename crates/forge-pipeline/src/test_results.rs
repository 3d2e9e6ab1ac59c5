// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Derives a [`TestResults`] count from a test-phase container's combined
//! output. `SandboxExecutor` reports pass/fail only through `exit_code` and
//! parsed `errors`; it has no notion of "how many tests ran" because that
//! format is test-framework-specific. This extends the same
//! approximate-by-design regex scraping `forge_sandbox::diagnostics` applies
//! to compiler/interpreter output, one level up, to test-runner summary
//! lines.
//!
//! When no known summary format matches, the phase's exit code stands in for
//! a single synthetic test: an honest "one test, pass/fail" rather than a
//! fabricated count.

use forge_core::TestResults;
use regex::Regex;
use std::sync::OnceLock;

struct Pattern {
    passed: &'static str,
    failed: &'static str,
    skipped: Option<&'static str>,
}

/// Summary-line regexes, tried in order, for the test-runner formats most
/// commonly emitted per entrypoint: pytest, cargo
/// test, jest, go test, dotnet test, JUnit-style harnesses, RSpec, PHPUnit.
const PATTERNS: &[Pattern] = &[
    Pattern {
        passed: r"(\d+) passed",
        failed: r"(\d+) failed",
        skipped: Some(r"(\d+) skipped"),
    },
    Pattern {
        passed: r"test result: \w+\. (\d+) passed",
        failed: r"test result: \w+\. \d+ passed; (\d+) failed",
        skipped: Some(r"(\d+) ignored"),
    },
    Pattern {
        passed: r"Tests:\s+(?:\d+ failed, )?(\d+) passed",
        failed: r"Tests:\s+(\d+) failed",
        skipped: Some(r"(\d+) skipped"),
    },
    Pattern {
        passed: r"Passed:\s+(\d+)",
        failed: r"Failed:\s+(\d+)",
        skipped: Some(r"Skipped:\s+(\d+)"),
    },
    Pattern {
        passed: r"Tests run: \d+, Failures: \d+, Errors: \d+, Skipped: (\d+)",
        failed: r"Tests run: \d+, Failures: (\d+)",
        skipped: None,
    },
    Pattern {
        passed: r"(\d+) examples?, 0 failures",
        failed: r"\d+ examples?, (\d+) failures?",
        skipped: None,
    },
];

#[allow(clippy::expect_used)]
fn regex_cache() -> &'static Vec<(Regex, Regex, Option<Regex>)> {
    static CACHE: OnceLock<Vec<(Regex, Regex, Option<Regex>)>> = OnceLock::new();
    CACHE.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|p| {
                (
                    Regex::new(p.passed).expect("static test-summary regex compiles"),
                    Regex::new(p.failed).expect("static test-summary regex compiles"),
                    p.skipped.map(|s| Regex::new(s).expect("static test-summary regex compiles")),
                )
            })
            .collect()
    })
}

fn capture_u32(re: &Regex, haystack: &str) -> Option<u32> {
    re.captures(haystack)?.get(1)?.as_str().parse().ok()
}

/// Scrape a `TestResults` summary out of combined stdout/stderr from a
/// `Test`-phase sandbox run.
pub fn parse(combined_output: &str, exit_code: i32, phase_succeeded: bool) -> TestResults {
    for (passed_re, failed_re, skipped_re) in regex_cache() {
        let passed = capture_u32(passed_re, combined_output);
        let failed = capture_u32(failed_re, combined_output);
        if let (Some(passed), Some(failed)) = (passed, failed) {
            let skipped = skipped_re.as_ref().and_then(|re| capture_u32(re, combined_output)).unwrap_or(0);
            return TestResults {
                total: passed + failed + skipped,
                passed,
                failed,
                skipped,
            };
        }
    }

    if phase_succeeded && exit_code == 0 {
        TestResults {
            total: 1,
            passed: 1,
            failed: 0,
            skipped: 0,
        }
    } else {
        TestResults {
            total: 1,
            passed: 0,
            failed: 1,
            skipped: 0,
        }
    }
}

#[cfg(test)]
#[path = "test_results_tests.rs"]
mod tests;
