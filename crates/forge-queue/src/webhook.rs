// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Best-effort webhook delivery: a failure to deliver is logged but never
//! propagates back to the worker loop.

use serde::Serialize;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub job_id: String,
    pub project_id: String,
    pub status: String,
    pub success: bool,
    pub iterations: u32,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST `payload` to `url` as JSON, bounded by `timeout`. Errors are logged
/// and swallowed: webhook delivery never fails a job.
pub async fn deliver(client: &reqwest::Client, url: &str, payload: &WebhookPayload, timeout: Duration) {
    let result = client.post(url).json(payload).timeout(timeout).send().await;
    match result {
        Ok(response) if !response.status().is_success() => {
            warn!(job_id = %payload.job_id, status = %response.status(), "webhook delivery rejected");
        }
        Ok(_) => {}
        Err(err) => {
            warn!(job_id = %payload.job_id, error = %err, "webhook delivery failed");
        }
    }
}
