// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use std::time::Duration;

#[tokio::test]
async fn starts_uncancelled() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());
}

#[tokio::test]
async fn cancel_is_observed() {
    let token = CancelToken::new();
    token.cancel();
    assert!(token.is_cancelled());
    tokio::time::timeout(Duration::from_millis(100), token.cancelled())
        .await
        .expect("cancelled() should resolve immediately once cancelled");
}

#[tokio::test]
async fn cancelled_future_resolves_after_cancel() {
    let token = CancelToken::new();
    let waiter = token.clone();
    let handle = tokio::spawn(async move {
        waiter.cancelled().await;
    });
    token.cancel();
    tokio::time::timeout(Duration::from_millis(200), handle)
        .await
        .expect("task should complete")
        .expect("task should not panic");
}

#[tokio::test]
async fn child_token_cancelled_when_parent_is() {
    let parent = CancelToken::new();
    let child = parent.child();
    assert!(!child.is_cancelled());
    parent.cancel();
    tokio::time::timeout(Duration::from_millis(200), child.cancelled())
        .await
        .expect("child should observe parent cancellation");
}
