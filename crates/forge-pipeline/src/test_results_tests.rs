// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn parses_pytest_summary() {
    let output = "===== 5 passed, 1 failed, 2 skipped in 0.42s =====";
    let results = parse(output, 1, false);
    assert_eq!(results.passed, 5);
    assert_eq!(results.failed, 1);
    assert_eq!(results.skipped, 2);
    assert_eq!(results.total, 8);
}

#[test]
fn parses_cargo_test_summary() {
    let output = "test result: ok. 3 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out";
    let results = parse(output, 0, true);
    assert_eq!(results.passed, 3);
    assert_eq!(results.failed, 0);
}

#[test]
fn falls_back_to_a_single_synthetic_test_on_success() {
    let results = parse("no recognizable summary here", 0, true);
    assert_eq!((results.total, results.passed, results.failed, results.skipped), (1, 1, 0, 0));
}

#[test]
fn falls_back_to_a_single_synthetic_failure() {
    let results = parse("panic: runtime error", 1, false);
    assert_eq!((results.total, results.passed, results.failed, results.skipped), (1, 0, 1, 0));
}
