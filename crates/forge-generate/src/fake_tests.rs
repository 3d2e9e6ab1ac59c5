// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use forge_core::{Language, ProjectFile};
use std::collections::HashMap;

fn request(prompt: &str) -> GenerationRequest {
    GenerationRequest {
        project_id: "proj-1".to_string(),
        language: Language::Python,
        prompt: prompt.to_string(),
        existing_files: Vec::new(),
        context: HashMap::new(),
    }
}

#[tokio::test]
async fn default_response_is_a_success_with_no_files() {
    let generator = FakeCodeGenerator::new();
    let response = generator.generate(request("write a function")).await.expect("generate succeeds");
    assert!(response.success);
    assert!(response.files.is_empty());
}

#[tokio::test]
async fn queued_responses_are_returned_in_order() {
    let generator = FakeCodeGenerator::new();
    generator.push_response(GenerationResponse {
        success: true,
        files: vec![ProjectFile::new("a.py", "x = 1").expect("valid")],
        explanation: None,
        error: None,
        tokens_used: 10,
    });
    generator.push_response(GenerationResponse {
        success: true,
        files: vec![ProjectFile::new("b.py", "y = 2").expect("valid")],
        explanation: None,
        error: None,
        tokens_used: 20,
    });

    let first = generator.generate(request("first")).await.expect("generate succeeds");
    let second = generator.generate(request("second")).await.expect("generate succeeds");
    assert_eq!(first.files[0].path, "a.py");
    assert_eq!(second.files[0].path, "b.py");
}

#[tokio::test]
async fn calls_are_recorded() {
    let generator = FakeCodeGenerator::new();
    generator.generate(request("one")).await.expect("generate succeeds");
    generator.generate(request("two")).await.expect("generate succeeds");
    let calls = generator.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].prompt, "one");
    assert_eq!(calls[1].prompt, "two");
}
