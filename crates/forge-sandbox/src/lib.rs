// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! forge-sandbox: language-agnostic, container-isolated execution.

pub mod container_runtime;
pub mod diagnostics;
pub mod entrypoint;
pub mod error;
pub mod executor;
pub mod workspace;

pub use container_runtime::{ContainerOutput, ContainerRuntime, ContainerSpec, ProcessContainerRuntime};
pub use error::SandboxError;
pub use executor::{ResourceLimits, SandboxExecutor};

#[cfg(any(test, feature = "test-support"))]
pub use container_runtime::{FakeContainerRuntime, RecordedRun};
