// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn python_generates_basic_and_edge_case_per_function() {
    let files = vec![ProjectFile::new("main.py", "def add(a: int, b: int) -> int:\n    return a + b\n").unwrap()];
    let generator = TestGenerator::new();
    let generated = generator.generate_tests(Language::Python, &files).unwrap();

    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].path, "test_generated.py");
    assert!(generated[0].content.contains("def test_add_basic():"));
    assert!(generated[0].content.contains("def test_add_edge_case():"));
    assert!(generated[0].content.contains("add(42, 42)"));
}

#[test]
fn no_signatures_produces_no_test_file() {
    let files = vec![ProjectFile::new("main.py", "x = 1\n").unwrap()];
    let generator = TestGenerator::new();
    let generated = generator.generate_tests(Language::Python, &files).unwrap();
    assert!(generated.is_empty());
}

#[test]
fn zero_parameter_function_skips_edge_case() {
    let files = vec![ProjectFile::new("main.py", "def greet():\n    return 'hi'\n").unwrap()];
    let generator = TestGenerator::new();
    let generated = generator.generate_tests(Language::Python, &files).unwrap();
    assert!(generated[0].content.contains("test_greet_basic"));
    assert!(!generated[0].content.contains("test_greet_edge_case"));
}

#[test]
fn go_generates_table_free_basic_test() {
    let files = vec![ProjectFile::new("main.go", "func Add(a int, b int) int {\n\treturn a + b\n}\n").unwrap()];
    let generator = TestGenerator::new();
    let generated = generator.generate_tests(Language::Go, &files).unwrap();
    assert_eq!(generated[0].path, "generated_test.go");
    assert!(generated[0].content.contains("package main"));
    assert!(generated[0].content.contains("func TestAddBasic(t *testing.T)"));
}

#[test]
fn java_tests_are_wrapped_in_generated_class() {
    let files =
        vec![ProjectFile::new("Calc.java", "public int add(int a, int b) {\n    return a + b;\n}\n").unwrap()];
    let generator = TestGenerator::new();
    let generated = generator.generate_tests(Language::Java, &files).unwrap();
    assert!(generated[0].content.starts_with("import org.junit.Test;"));
    assert!(generated[0].content.trim_end().ends_with('}'));
}
