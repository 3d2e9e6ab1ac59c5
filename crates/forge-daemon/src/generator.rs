// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Picks the `CodeGenerator` collaborator implementation at startup: a real
//! HTTP endpoint when one is configured, otherwise the in-memory fake so the
//! daemon is runnable with no generation backend wired up.

use forge_generate::{CodeGenerator, FakeCodeGenerator, GenerationError, GenerationRequest, GenerationResponse, HttpCodeGenerator};

#[derive(Clone)]
pub enum Generator {
    Http(HttpCodeGenerator),
    Fake(FakeCodeGenerator),
}

#[async_trait::async_trait]
impl CodeGenerator for Generator {
    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        match self {
            Self::Http(g) => g.generate(req).await,
            Self::Fake(g) => g.generate(req).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::{Language, ProjectFile};
    use std::collections::HashMap;

    fn request() -> GenerationRequest {
        GenerationRequest {
            project_id: "proj-1".to_string(),
            language: Language::Python,
            prompt: "add two numbers".to_string(),
            existing_files: vec![ProjectFile::new("main.py", "").unwrap()],
            context: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn fake_variant_delegates_to_the_fake_generator() {
        let fake = FakeCodeGenerator::new();
        fake.push_response(GenerationResponse {
            success: true,
            files: vec![ProjectFile::new("main.py", "def add(a, b): return a + b").unwrap()],
            explanation: None,
            error: None,
            tokens_used: 42,
        });
        let generator = Generator::Fake(fake.clone());

        let response = generator.generate(request()).await.unwrap();

        assert!(response.success);
        assert_eq!(response.tokens_used, 42);
        assert_eq!(fake.call_count(), 1);
    }
}
