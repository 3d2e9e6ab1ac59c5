// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Deterministic fake generator for pipeline tests, grounded on the
//! teacher's call-recording fake-adapter pattern.

use crate::error::GenerationError;
use crate::generator::{CodeGenerator, GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One recorded call to [`FakeCodeGenerator::generate`].
#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub project_id: String,
    pub prompt: String,
    pub existing_file_count: usize,
}

/// Programmable fake: returns queued canned responses in order, falling back
/// to a default success response once the queue is empty, and records every
/// call for assertion.
#[derive(Clone)]
pub struct FakeCodeGenerator {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    queued: VecDeque<GenerationResponse>,
    default_response: GenerationResponse,
    calls: Vec<GenerateCall>,
}

impl FakeCodeGenerator {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                queued: VecDeque::new(),
                default_response: GenerationResponse {
                    success: true,
                    files: Vec::new(),
                    explanation: None,
                    error: None,
                    tokens_used: 0,
                },
                calls: Vec::new(),
            })),
        }
    }

    /// Queue a response to be returned by the next call; responses are
    /// consumed in FIFO order, letting a test script iteration k+1's output
    /// independently of iteration k's.
    pub fn push_response(&self, response: GenerationResponse) {
        self.inner.lock().queued.push_back(response);
    }

    pub fn set_default_response(&self, response: GenerationResponse) {
        self.inner.lock().default_response = response;
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

impl Default for FakeCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeGenerator for FakeCodeGenerator {
    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        let mut inner = self.inner.lock();
        inner.calls.push(GenerateCall {
            project_id: req.project_id.clone(),
            prompt: req.prompt.clone(),
            existing_file_count: req.existing_files.len(),
        });
        Ok(inner.queued.pop_front().unwrap_or_else(|| inner.default_response.clone()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
