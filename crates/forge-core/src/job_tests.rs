// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use crate::request::PipelineRequest;
use std::collections::HashMap;

fn request() -> PipelineRequest {
    PipelineRequest {
        project_id: "p".into(),
        user_id: "u".into(),
        language: "python".into(),
        prompt: "do it".into(),
        files: vec![],
        entry_point: None,
        run_after_build: false,
        context: HashMap::new(),
        max_iterations: 10,
    }
}

#[test]
fn new_job_starts_queued_without_completed_at() {
    let job = PipelineJob::new(JobId::new("j-1"), request(), 1, 1_000, None);
    assert_eq!(job.status, JobStatus::Queued);
    assert!(job.completed_at_ms.is_none());
    assert!(!job.is_terminal());
}

#[test]
fn mark_running_sets_started_at() {
    let mut job = PipelineJob::new(JobId::new("j-1"), request(), 1, 1_000, None);
    job.mark_running(1_500);
    assert_eq!(job.status, JobStatus::Running);
    assert_eq!(job.started_at_ms, Some(1_500));
}

#[test]
fn mark_terminal_sets_completed_at_and_message() {
    let mut job = PipelineJob::new(JobId::new("j-1"), request(), 1, 1_000, None);
    job.mark_running(1_500);
    job.mark_terminal(JobStatus::Completed, Some("ok".into()), 2_000);
    assert!(job.is_terminal());
    assert_eq!(job.completed_at_ms, Some(2_000));
    assert_eq!(job.status_message.as_deref(), Some("ok"));
}

#[test]
fn cancel_handle_is_observable() {
    let job = PipelineJob::new(JobId::new("j-1"), request(), 1, 1_000, None);
    assert!(!job.cancel.is_cancelled());
    job.cancel.cancel();
    assert!(job.cancel.is_cancelled());
}
