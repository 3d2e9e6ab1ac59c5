// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use forge_core::ProjectFile;

fn file(content: &str) -> ProjectFile {
    ProjectFile::new("sample.py", content).unwrap()
}

#[test]
fn balanced_brackets_produce_no_errors() {
    let f = file("def f(a, b):\n    return [a, b] + {1: 2}\n");
    assert!(check_brackets(&f).is_empty());
}

#[test]
fn unclosed_bracket_is_reported_with_opening_location() {
    let f = file("def f(a, b:\n    return a\n");
    let errors = check_brackets(&f);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, Some(1));
    assert_eq!(errors[0].column, Some(6));
}

#[test]
fn mismatched_bracket_is_reported() {
    let f = file("values = [1, 2}\n");
    let errors = check_brackets(&f);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, forge_core::ExecutionErrorType::SyntaxError);
}

#[test]
fn brackets_inside_string_literals_are_ignored() {
    let f = file("message = \"unmatched ( bracket\"\nprint(message)\n");
    assert!(check_brackets(&f).is_empty());
}

#[test]
fn brackets_inside_line_comment_are_ignored() {
    let f = file("value = 1 // looks unbalanced (\nother = 2\n");
    assert!(check_brackets(&f).is_empty());
}

#[test]
fn brackets_inside_block_comment_are_ignored() {
    let f = file("/* (unbalanced */\nvalue(1)\n");
    assert!(check_brackets(&f).is_empty());
}

#[test]
fn escaped_quote_inside_string_does_not_end_it_early() {
    let f = file("s = \"a \\\" ( b\"\nprint(s)\n");
    assert!(check_brackets(&f).is_empty());
}

#[test]
fn unexpected_closing_bracket_with_empty_stack_is_reported() {
    let f = file("value)\n");
    let errors = check_brackets(&f);
    assert_eq!(errors.len(), 1);
}
