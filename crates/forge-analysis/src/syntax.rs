// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Single-pass bracket matcher used as the first, cheapest syntax gate
//! before any sandboxed linting is attempted.

use forge_core::{ExecutionError, ExecutionErrorType, ProjectFile};

#[derive(Clone, Copy)]
struct OpenBracket {
    expected_close: char,
    line: u32,
    column: u32,
}

/// Scan one file's content for unbalanced `()`, `[]`, `{}`, ignoring
/// characters inside string literals (`"`, `'`, `` ` ``) and comments
/// (`//` line, `/* … */` block). Returns one `SyntaxError` per unclosed or
/// mismatched bracket, each carrying the location where the bracket opened.
pub fn check_brackets(file: &ProjectFile) -> Vec<ExecutionError> {
    let mut errors = Vec::new();
    let mut stack: Vec<OpenBracket> = Vec::new();

    let mut line: u32 = 1;
    let mut column: u32 = 0;
    let mut in_string: Option<char> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    let chars: Vec<char> = file.content.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            column = 0;
            in_line_comment = false;
            i += 1;
            continue;
        }
        column += 1;

        if in_line_comment {
            i += 1;
            continue;
        }

        if in_block_comment {
            if c == '*' && chars.get(i + 1) == Some(&'/') {
                in_block_comment = false;
                i += 2;
                column += 1;
                continue;
            }
            i += 1;
            continue;
        }

        if let Some(quote) = in_string {
            if c == '\\' {
                i += 2;
                column += 1;
                continue;
            }
            if c == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }

        match c {
            '"' | '\'' | '`' => {
                in_string = Some(c);
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                in_line_comment = true;
                i += 2;
                column += 1;
                continue;
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                in_block_comment = true;
                i += 2;
                column += 1;
                continue;
            }
            '(' => stack.push(OpenBracket { expected_close: ')', line, column }),
            '[' => stack.push(OpenBracket { expected_close: ']', line, column }),
            '{' => stack.push(OpenBracket { expected_close: '}', line, column }),
            ')' | ']' | '}' => match stack.pop() {
                Some(open) if open.expected_close == c => {}
                Some(open) => errors.push(mismatch_error(file, &open)),
                None => errors.push(ExecutionError::new(
                    ExecutionErrorType::SyntaxError,
                    format!("unexpected closing '{c}' with no matching opening bracket"),
                )
                .with_location(file.path.clone(), line, column)),
            },
            _ => {}
        }

        i += 1;
    }

    for open in stack {
        errors.push(mismatch_error(file, &open));
    }

    errors
}

fn mismatch_error(file: &ProjectFile, open: &OpenBracket) -> ExecutionError {
    ExecutionError::new(
        ExecutionErrorType::SyntaxError,
        format!("unclosed '{}' opened here", matching_open(open.expected_close)),
    )
    .with_location(file.path.clone(), open.line, open.column)
}

fn matching_open(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        '}' => '{',
        other => other,
    }
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
