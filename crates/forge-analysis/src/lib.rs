// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! forge-analysis: static syntax/lint gating and generated-test
//! synthesis.

pub mod analyzer;
pub mod error;
pub mod signature;
pub mod syntax;
pub mod test_generator;

pub use analyzer::StaticAnalyzer;
pub use error::AnalysisError;
pub use signature::{extract, FunctionSignature, Parameter};
pub use test_generator::TestGenerator;
