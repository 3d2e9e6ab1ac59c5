// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! forge-generate: the `CodeGenerator` collaborator interface. No LLM
//! provider is implemented here.

pub mod error;
pub mod generator;
pub mod http;

pub use error::GenerationError;
pub use generator::{CodeGenerator, GenerationRequest, GenerationResponse};
pub use http::HttpCodeGenerator;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCodeGenerator, GenerateCall};
