// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Enqueued job record.

use crate::cancel::CancelToken;
use crate::id::JobId;
use crate::request::PipelineRequest;
use crate::status::JobStatus;

/// One job tracked by the queue, from admission to a terminal outcome.
///
/// `cancel` is not `Serialize`: jobs live only in the in-memory queue map
///, never cross a wire boundary.
#[derive(Clone)]
pub struct PipelineJob {
    pub id: JobId,
    pub request: PipelineRequest,
    pub status: JobStatus,
    pub status_message: Option<String>,
    pub queue_position: usize,
    pub created_at_ms: u64,
    pub started_at_ms: Option<u64>,
    pub completed_at_ms: Option<u64>,
    pub webhook_url: Option<String>,
    pub cancel: CancelToken,
}

impl PipelineJob {
    pub fn new(
        id: JobId,
        request: PipelineRequest,
        queue_position: usize,
        created_at_ms: u64,
        webhook_url: Option<String>,
    ) -> Self {
        Self {
            id,
            request,
            status: JobStatus::Queued,
            status_message: None,
            queue_position,
            created_at_ms,
            started_at_ms: None,
            completed_at_ms: None,
            webhook_url,
            cancel: CancelToken::new(),
        }
    }

    /// Transition into `Running`, recording the start time. No-op (besides
    /// the timestamp) if already running.
    pub fn mark_running(&mut self, now_ms: u64) {
        self.status = JobStatus::Running;
        self.started_at_ms = Some(now_ms);
    }

    /// Transition into a terminal status, recording completion and an
    /// optional human-readable message. A terminal status always has
    /// `completed_at` set.
    pub fn mark_terminal(&mut self, status: JobStatus, message: Option<String>, now_ms: u64) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.status_message = message;
        self.completed_at_ms = Some(now_ms);
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
