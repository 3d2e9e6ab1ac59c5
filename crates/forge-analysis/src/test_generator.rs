// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `TestGenerator`: the concrete `TestsGenerated` capability.

use crate::error::AnalysisError;
use crate::signature::{extract, FunctionSignature, Parameter};
use forge_core::{Language, ProjectFile, TestsGenerated};

/// Emits one basic-input test and one edge-case test per extracted
/// signature, wrapped in the language's conventional test-file preamble.
pub struct TestGenerator;

impl TestGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TestGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_value(type_hint: Option<&str>, language: Language) -> &'static str {
    let hint = type_hint.unwrap_or("").to_ascii_lowercase();
    if hint.contains("int") || hint.contains("long") || hint.contains("number") {
        "42"
    } else if hint.contains("float") || hint.contains("double") || hint.contains("decimal") {
        "3.14"
    } else if hint.contains("bool") {
        match language {
            Language::Python => "True",
            _ => "true",
        }
    } else if hint.contains("[]") || hint.contains("list") || hint.contains("array") || hint.contains("slice") || hint.contains("vec") {
        empty_collection(language)
    } else {
        "\"test\""
    }
}

fn empty_collection(language: Language) -> &'static str {
    match language {
        Language::Python => "[]",
        Language::JavaScript | Language::Php => "[]",
        Language::CSharp | Language::Java => "new ArrayList<>()",
        Language::Go => "nil",
        Language::Rust => "Vec::new()",
        Language::Ruby => "[]",
    }
}

fn null_value(language: Language) -> &'static str {
    match language {
        Language::Python => "None",
        Language::JavaScript => "null",
        Language::CSharp | Language::Java => "null",
        Language::Go => "nil",
        Language::Rust => "None",
        Language::Ruby => "nil",
        Language::Php => "null",
    }
}

fn call_args(params: &[Parameter], language: Language, use_null: bool) -> String {
    params
        .iter()
        .map(|p| {
            if use_null {
                null_value(language).to_string()
            } else {
                sample_value(p.type_hint.as_deref(), language).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn basic_case(sig: &FunctionSignature, language: Language) -> String {
    let args = call_args(&sig.parameters, language, false);
    let call = format!("{}({})", sig.name, args);
    match language {
        Language::Python => format!(
            "def test_{name}_basic():\n    result = {call}\n    assert result is not None\n",
            name = sig.name,
            call = call
        ),
        Language::JavaScript => format!(
            "test('{name} returns a value for basic input', () => {{\n  const result = {call};\n  expect(result).toBeDefined();\n}});\n",
            name = sig.name,
            call = call
        ),
        Language::Rust => format!(
            "#[test]\nfn {name}_basic() {{\n    let result = {call};\n    let _ = result;\n}}\n",
            name = sig.name,
            call = call
        ),
        Language::Ruby => format!(
            "def test_{name}_basic\n  result = {call}\n  assert_not_nil result\nend\n",
            name = sig.name,
            call = call
        ),
        Language::Php => format!(
            "public function test{Name}Basic() {{\n    $result = {call};\n    $this->assertNotNull($result);\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
        Language::CSharp => format!(
            "[Test]\npublic void {Name}_Basic() {{\n    var result = {call};\n    Assert.IsNotNull(result);\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
        Language::Java => format!(
            "@Test\npublic void test{Name}Basic() {{\n    var result = {call};\n    assertNotNull(result);\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
        Language::Go => format!(
            "func Test{Name}Basic(t *testing.T) {{\n\tresult := {call}\n\t_ = result\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
    }
}

fn edge_case(sig: &FunctionSignature, language: Language) -> String {
    if sig.parameters.is_empty() {
        return String::new();
    }
    let args = call_args(&sig.parameters, language, true);
    let call = format!("{}({})", sig.name, args);
    match language {
        Language::Python => format!(
            "def test_{name}_edge_case():\n    try:\n        {call}\n    except (ValueError, TypeError):\n        pass\n",
            name = sig.name,
            call = call
        ),
        Language::JavaScript => format!(
            "test('{name} handles null input', () => {{\n  try {{\n    {call};\n  }} catch (e) {{\n    expect(e).toBeDefined();\n  }}\n}});\n",
            name = sig.name,
            call = call
        ),
        Language::Rust => format!(
            "#[test]\nfn {name}_edge_case() {{\n    let _ = std::panic::catch_unwind(|| {call});\n}}\n",
            name = sig.name,
            call = call
        ),
        Language::Ruby => format!(
            "def test_{name}_edge_case\n  {call}\nrescue StandardError\nend\n",
            name = sig.name,
            call = call
        ),
        Language::Php => format!(
            "public function test{Name}EdgeCase() {{\n    try {{\n        {call};\n    }} catch (\\Throwable $e) {{\n    }}\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
        Language::CSharp => format!(
            "[Test]\npublic void {Name}_EdgeCase() {{\n    try {{ {call}; }} catch (Exception) {{ }}\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
        Language::Java => format!(
            "@Test\npublic void test{Name}EdgeCase() {{\n    try {{ {call}; }} catch (Exception e) {{ }}\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
        Language::Go => format!(
            "func Test{Name}EdgeCase(t *testing.T) {{\n\tdefer func() {{ recover() }}()\n\t{call}\n}}\n",
            Name = capitalize(&sig.name),
            call = call
        ),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn preamble(language: Language) -> &'static str {
    match language {
        Language::Python => "import pytest\n\n",
        Language::JavaScript => "const { test, expect } = require('@jest/globals');\n\n",
        Language::Rust => "",
        Language::Ruby => "require 'minitest/autorun'\n\n",
        Language::Php => "<?php\n\nuse PHPUnit\\Framework\\TestCase;\n\nclass GeneratedTest extends TestCase {\n",
        Language::CSharp => "using NUnit.Framework;\n\nnamespace GeneratedTests {\n  public class GeneratedTest {\n",
        Language::Java => "import org.junit.Test;\nimport static org.junit.Assert.*;\n\npublic class GeneratedTest {\n",
        Language::Go => "package main\n\nimport \"testing\"\n\n",
    }
}

fn closing(language: Language) -> &'static str {
    match language {
        Language::Php => "}\n",
        Language::CSharp => "  }\n}\n",
        Language::Java => "}\n",
        _ => "",
    }
}

fn test_file_name(language: Language) -> &'static str {
    match language {
        Language::Python => "test_generated.py",
        Language::JavaScript => "generated.test.js",
        Language::Rust => "generated_tests.rs",
        Language::Ruby => "generated_test.rb",
        Language::Php => "GeneratedTest.php",
        Language::CSharp => "GeneratedTest.cs",
        Language::Java => "GeneratedTest.java",
        Language::Go => "generated_test.go",
    }
}

impl TestsGenerated for TestGenerator {
    type Error = AnalysisError;

    fn generate_tests(&self, language: Language, files: &[ProjectFile]) -> Result<Vec<ProjectFile>, AnalysisError> {
        let signatures: Vec<FunctionSignature> = files
            .iter()
            .flat_map(|f| extract(language, &f.path, &f.content))
            .collect();

        if signatures.is_empty() {
            return Ok(Vec::new());
        }

        let mut body = String::from(preamble(language));
        for sig in &signatures {
            body.push_str(&basic_case(sig, language));
            body.push('\n');
            let edge = edge_case(sig, language);
            if !edge.is_empty() {
                body.push_str(&edge);
                body.push('\n');
            }
        }
        body.push_str(closing(language));

        let file =
            ProjectFile::new(test_file_name(language), body).map_err(|e| AnalysisError::InvalidTestFile(e.to_string()))?;
        Ok(vec![file])
    }
}

#[cfg(test)]
#[path = "test_generator_tests.rs"]
mod tests;
