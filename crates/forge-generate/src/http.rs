// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `HttpCodeGenerator`: forwards a [`GenerationRequest`] as JSON to a
//! configured endpoint and parses the JSON response body as a
//! [`GenerationResponse`].
//!
//! This is the external collaborator boundary from spec.md §6: no LLM
//! provider logic lives here, only a generic POST/parse roundtrip, mirroring
//! how `forge-queue`'s webhook delivery treats its callback URL as an opaque
//! HTTP peer.

use crate::error::GenerationError;
use crate::generator::{CodeGenerator, GenerationRequest, GenerationResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Calls a configured HTTP endpoint for each generation request.
#[derive(Clone)]
pub struct HttpCodeGenerator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpCodeGenerator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CodeGenerator for HttpCodeGenerator {
    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&req)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| GenerationError::Provider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(project_id = %req.project_id, %status, "generation endpoint returned a non-success status");
            return Err(GenerationError::Provider(format!("endpoint returned {status}")));
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| GenerationError::Provider(format!("could not parse response: {e}")))
    }
}
