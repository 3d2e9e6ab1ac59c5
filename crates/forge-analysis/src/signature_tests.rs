// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use forge_core::Language;

#[test]
fn python_signature_with_type_hints_and_default() {
    let content = "def add(a: int, b: int = 2) -> int:\n    return a + b\n";
    let sigs = extract(Language::Python, "main.py", content);
    assert_eq!(sigs.len(), 1);
    assert_eq!(sigs[0].name, "add");
    assert_eq!(sigs[0].parameters.len(), 2);
    assert_eq!(sigs[0].parameters[0].name, "a");
    assert_eq!(sigs[0].return_type.as_deref(), Some("int"));
}

#[test]
fn python_skips_underscore_and_test_prefixed_and_main() {
    let content = "def _helper(x):\n    pass\n\ndef test_add(x):\n    pass\n\ndef main():\n    pass\n";
    let sigs = extract(Language::Python, "main.py", content);
    assert!(sigs.is_empty());
}

fn async_python_is_flagged() -> bool {
    let content = "async def fetch(url):\n    pass\n";
    let sigs = extract(Language::Python, "main.py", content);
    sigs[0].is_async
}

#[test]
fn python_async_def_is_flagged() {
    assert!(async_python_is_flagged());
}

#[test]
fn javascript_function_signature_is_extracted() {
    let content = "function greet(name) {\n  return `hi ${name}`;\n}\n";
    let sigs = extract(Language::JavaScript, "app.js", content);
    assert_eq!(sigs.len(), 1);
    assert_eq!(sigs[0].name, "greet");
    assert_eq!(sigs[0].parameters[0].name, "name");
}

#[test]
fn go_typed_signature_uses_type_name_ordering() {
    let content = "func Add(a int, b int) int {\n\treturn a + b\n}\n";
    let sigs = extract(Language::Go, "main.go", content);
    assert_eq!(sigs.len(), 1);
    assert_eq!(sigs[0].name, "Add");
    assert_eq!(sigs[0].parameters[0].name, "a");
    assert_eq!(sigs[0].parameters[0].type_hint.as_deref(), Some("int"));
}

#[test]
fn rust_fn_signature_is_extracted() {
    let content = "pub fn multiply(x: i32, y: i32) -> i32 {\n    x * y\n}\n";
    let sigs = extract(Language::Rust, "lib.rs", content);
    assert_eq!(sigs.len(), 1);
    assert_eq!(sigs[0].name, "multiply");
    assert_eq!(sigs[0].parameters[0].type_hint.as_deref(), Some("i32"));
}

#[test]
fn ruby_method_without_parens_has_no_parameters() {
    let content = "def greet\n  puts 'hi'\nend\n";
    let sigs = extract(Language::Ruby, "app.rb", content);
    assert_eq!(sigs.len(), 1);
    assert!(sigs[0].parameters.is_empty());
}
