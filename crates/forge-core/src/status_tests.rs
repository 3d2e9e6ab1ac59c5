// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;

#[test]
fn pending_and_running_are_non_terminal() {
    assert!(!PipelineStatus::Pending.is_terminal());
    assert!(!PipelineStatus::Running.is_terminal());
}

#[test]
fn all_other_statuses_are_terminal() {
    for status in [
        PipelineStatus::Success,
        PipelineStatus::GenerationFailed,
        PipelineStatus::StaticAnalysisFailed,
        PipelineStatus::BuildFailed,
        PipelineStatus::TestsFailed,
        PipelineStatus::RuntimeFailed,
        PipelineStatus::VerificationFailed,
        PipelineStatus::RateLimited,
        PipelineStatus::Cancelled,
        PipelineStatus::InternalError,
    ] {
        assert!(status.is_terminal(), "{status} should be terminal");
    }
}

#[test]
fn job_status_maps_success_to_completed() {
    assert_eq!(
        JobStatus::from_pipeline_status(PipelineStatus::Success),
        JobStatus::Completed
    );
}

#[test]
fn job_status_maps_cancelled_to_cancelled() {
    assert_eq!(
        JobStatus::from_pipeline_status(PipelineStatus::Cancelled),
        JobStatus::Cancelled
    );
}

#[test]
fn job_status_maps_other_failures_to_failed() {
    assert_eq!(
        JobStatus::from_pipeline_status(PipelineStatus::BuildFailed),
        JobStatus::Failed
    );
    assert_eq!(
        JobStatus::from_pipeline_status(PipelineStatus::RateLimited),
        JobStatus::Failed
    );
}

#[test]
fn job_status_terminal_set() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(JobStatus::Cancelled.is_terminal());
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Running.is_terminal());
}
