// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `AgentPipeline`: the iterative closed-loop state machine that
//! composes the narrow capability traits into a single `execute` operation.

use crate::config::PipelineConfig;
use crate::test_results;
use forge_core::{
    CancelToken, Clock, ExecutionError, ExecutionErrorType, ExecutionPhase, ExecutionRequest,
    Issue, PhaseResult, PipelinePhase, PipelineRequest, PipelineResult, PipelineStatus,
    RateLimited, Sandboxed, TestResults, VerificationCategory, VerificationInput, Verified,
};
use forge_core::{Analyzed, TestsGenerated};
use forge_generate::{CodeGenerator, GenerationRequest};
use std::sync::Arc;
use tracing::{info, info_span, warn};

/// Composes a `CodeGenerator`, `Sandboxed`, `Analyzed`, `TestsGenerated`,
/// `Verified`, and `RateLimited` implementation into the closed-loop driver.
/// Generic over each capability rather than trait objects so a caller pays no
/// dynamic-dispatch cost and gets full monomorphization (mirrors the
/// teacher's `Executor<S, A, N, C: Clock>` composition).
pub struct AgentPipeline<G, S, A, T, V, R, C>
where
    G: CodeGenerator,
    S: Sandboxed,
    A: Analyzed,
    T: TestsGenerated,
    V: Verified,
    R: RateLimited,
    C: Clock,
{
    generator: Arc<G>,
    sandbox: Arc<S>,
    analyzer: Arc<A>,
    test_generator: Arc<T>,
    gate: Arc<V>,
    rate_limiter: Arc<R>,
    clock: C,
    config: PipelineConfig,
}

/// One phase's go/no-go verdict, shared by the four self-correcting steps
/// (static analysis, build, test execution, optional run).
enum StepOutcome {
    Continue,
    Terminate(PipelineStatus),
}

impl<G, S, A, T, V, R, C> AgentPipeline<G, S, A, T, V, R, C>
where
    G: CodeGenerator,
    S: Sandboxed,
    A: Analyzed,
    T: TestsGenerated,
    V: Verified,
    R: RateLimited,
    C: Clock,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        generator: Arc<G>,
        sandbox: Arc<S>,
        analyzer: Arc<A>,
        test_generator: Arc<T>,
        gate: Arc<V>,
        rate_limiter: Arc<R>,
        clock: C,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            sandbox,
            analyzer,
            test_generator,
            gate,
            rate_limiter,
            clock,
            config,
        }
    }

    /// Run one request to a terminal `PipelineResult`. Never returns `Err`:
    /// every failure mode the state machine anticipates is represented by a
    /// terminal `PipelineStatus` on the returned value. A fatal error that
    /// escapes any specific phase attribution still lands here as
    /// `InternalError`.
    pub async fn execute(
        &self,
        request: PipelineRequest,
        request_id: impl Into<String>,
        cancel: CancelToken,
    ) -> PipelineResult {
        let request_id = request_id.into();
        let span = info_span!("pipeline", project_id = %request.project_id, request_id = %request_id);
        let _guard = span.enter();

        let started_at_ms = self.clock.epoch_ms();
        let mut result = PipelineResult::new(request.project_id.clone(), request_id, started_at_ms);

        info!("admitting pipeline request");
        let start = std::time::Instant::now();
        let decision = match self.rate_limiter.check(&request.project_id, &request.user_id) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(error = %e, "rate limiter check failed");
                result.finalize(PipelineStatus::InternalError, self.clock.epoch_ms(), Some(e.to_string()));
                return result;
            }
        };
        if !decision.allowed {
            info!(elapsed_ms = start.elapsed().as_millis() as u64, "admission denied");
            result.finalize(PipelineStatus::RateLimited, self.clock.epoch_ms(), decision.message);
            return result;
        }

        let language = match request.validate() {
            Ok(language) => language,
            Err(e) => {
                result.finalize(PipelineStatus::InternalError, self.clock.epoch_ms(), Some(e.to_string()));
                let _ = self.rate_limiter.record(&request.project_id, &request.user_id, &result);
                return result;
            }
        };

        let outcome = self.run_loop(&request, language, &cancel, &mut result).await;
        result.finalize(outcome, self.clock.epoch_ms(), result.error_message.clone());

        match self.rate_limiter.record(&request.project_id, &request.user_id, &result) {
            Ok(cost) => result.total_cost = cost,
            Err(e) => warn!(error = %e, "failed to record rate-limiter accounting"),
        }

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            status = %result.status,
            iterations = result.iterations,
            "pipeline finished"
        );
        result
    }

    /// Drives iterations 1..=`max_total_iterations`, returning the terminal
    /// status. `result.phases`/`result.iterations`/`result.error_message` are
    /// populated as a side effect so the caller only needs to `finalize`.
    async fn run_loop(
        &self,
        request: &PipelineRequest,
        language: forge_core::Language,
        cancel: &CancelToken,
        result: &mut PipelineResult,
    ) -> PipelineStatus {
        let mut current_files = request.files.clone();
        let mut errors: Vec<ExecutionError> = Vec::new();
        let mut last_analysis = None;
        let mut last_test_results: Option<TestResults> = None;

        for k in 1..=self.config.max_total_iterations {
            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }
            result.iterations = k;

            // Step 1: generate. Skipped at k = 1 when the request already
            // supplies source files; always run again once self-correction
            // has accumulated errors. Resolves an ambiguity between the literal
            // "k=1 or errors non-empty" rule and the narrated "existing file
            // used on the first pass" behavior -- see DESIGN.md.
            if current_files.is_empty() || !errors.is_empty() {
                let prompt = render_prompt(&request.prompt, &errors, self.config.error_history_tail, self.config.max_stack_chars);
                let gen_request = GenerationRequest {
                    project_id: request.project_id.clone(),
                    language,
                    prompt,
                    existing_files: current_files.clone(),
                    context: request.context.clone(),
                };
                let phase_start = std::time::Instant::now();
                match self.generator.generate(gen_request).await {
                    Ok(response) => {
                        let duration_ms = phase_start.elapsed().as_millis() as u64;
                        let mut phase = PhaseResult::new(PipelinePhase::Generate, response.success, duration_ms, response.explanation.clone().unwrap_or_default())
                            .with_tokens_used(response.tokens_used);
                        if !response.success {
                            let message = response.error.clone().unwrap_or_else(|| "generation failed".to_string());
                            phase = phase.with_errors(vec![ExecutionError::new(ExecutionErrorType::GenerationError, message.clone())]);
                            result.phases.push(phase);
                            result.error_message = Some(message);
                            return PipelineStatus::GenerationFailed;
                        }
                        if !response.files.is_empty() {
                            phase.output_files = Some(response.files.clone());
                            current_files = response.files;
                        }
                        result.phases.push(phase);
                    }
                    Err(e) => {
                        result.error_message = Some(e.to_string());
                        return PipelineStatus::InternalError;
                    }
                }
            }

            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }

            // Step 2: static analysis.
            let phase_start = std::time::Instant::now();
            let analysis = match self
                .analyzer
                .analyze(&request.project_id, language, &current_files, cancel.child())
                .await
            {
                Ok(analysis) => analysis,
                Err(e) => {
                    result.error_message = Some(e.to_string());
                    return PipelineStatus::InternalError;
                }
            };
            let duration_ms = phase_start.elapsed().as_millis() as u64;
            let phase = PhaseResult {
                analysis: Some(analysis.clone()),
                ..PhaseResult::new(PipelinePhase::StaticAnalyze, analysis.passes_gate, duration_ms, analysis.lint_output.clone())
                    .with_errors(analysis.syntax_errors.iter().chain(analysis.lint_errors.iter()).cloned().collect())
            };
            let gate_passed = analysis.passes_gate;
            let phase_errors = phase.errors.clone();
            result.phases.push(phase);
            last_analysis = Some(analysis);
            if !gate_passed {
                match self.record_failure(&mut errors, phase_errors, PipelineStatus::StaticAnalysisFailed, result) {
                    StepOutcome::Terminate(status) => return status,
                    StepOutcome::Continue => continue,
                }
            }

            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }

            // Step 3: build.
            let build_request = ExecutionRequest {
                project_id: request.project_id.clone(),
                language,
                files: current_files.clone(),
                entry_point: request.entry_point.clone(),
                phase: ExecutionPhase::Build,
                timeout_seconds: self.config.build_timeout_secs,
                allow_network: false,
                env: Vec::new(),
            };
            let build_result = match self
                .sandbox
                .execute_with_retry(build_request, self.config.sandbox_max_retries, cancel.child())
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    result.error_message = Some(e.to_string());
                    return PipelineStatus::InternalError;
                }
            };
            let build_output = format!("{}\n{}", build_result.stdout, build_result.stderr);
            let phase = PhaseResult::new(PipelinePhase::Build, build_result.success, build_result.execution_time_ms, build_output.clone())
                .with_errors(build_result.errors.clone());
            let build_succeeded = build_result.success;
            let build_errors = build_result.errors.clone();
            result.phases.push(phase);
            if !build_succeeded {
                match self.record_failure(&mut errors, build_errors, PipelineStatus::BuildFailed, result) {
                    StepOutcome::Terminate(status) => return status,
                    StepOutcome::Continue => continue,
                }
            }

            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }

            // Step 4: test generation (non-fatal).
            match self.test_generator.generate_tests(language, &current_files) {
                Ok(generated) if !generated.is_empty() => {
                    let mut phase = PhaseResult::new(PipelinePhase::TestGenerate, true, 0, "");
                    phase.output_files = Some(generated.clone());
                    result.phases.push(phase);
                    current_files.extend(generated);
                }
                Ok(_) => {
                    result.phases.push(PhaseResult::new(PipelinePhase::TestGenerate, true, 0, ""));
                }
                Err(e) => {
                    result.phases.push(PhaseResult::new(PipelinePhase::TestGenerate, false, 0, e.to_string()));
                }
            }

            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }

            // Step 5: test execution.
            let test_request = ExecutionRequest {
                project_id: request.project_id.clone(),
                language,
                files: current_files.clone(),
                entry_point: request.entry_point.clone(),
                phase: ExecutionPhase::Test,
                timeout_seconds: self.config.test_timeout_secs,
                allow_network: false,
                env: Vec::new(),
            };
            let test_exec_result = match self
                .sandbox
                .execute_with_retry(test_request, self.config.sandbox_max_retries, cancel.child())
                .await
            {
                Ok(result) => result,
                Err(e) => {
                    result.error_message = Some(e.to_string());
                    return PipelineStatus::InternalError;
                }
            };
            let test_output = format!("{}\n{}", test_exec_result.stdout, test_exec_result.stderr);
            let parsed_tests = test_results::parse(&test_output, test_exec_result.exit_code, test_exec_result.success);
            let tests_passed = test_exec_result.success && parsed_tests.failed == 0;
            let mut phase = PhaseResult::new(PipelinePhase::TestExecute, tests_passed, test_exec_result.execution_time_ms, test_output)
                .with_errors(test_exec_result.errors.clone());
            phase.test_results = Some(parsed_tests);
            let test_errors = test_exec_result.errors.clone();
            result.phases.push(phase);
            last_test_results = Some(parsed_tests);
            if !tests_passed {
                match self.record_failure(&mut errors, test_errors, PipelineStatus::TestsFailed, result) {
                    StepOutcome::Terminate(status) => return status,
                    StepOutcome::Continue => continue,
                }
            }

            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }

            // Step 6: optional run. The verification gate's Runtime check (spec.md
            // §4.4 check 5) aggregates Runtime/Exception errors surfaced by the test
            // phase specifically, not this optional run phase, so seed it from
            // `test_errors` regardless of whether `run_after_build` is set.
            let runtime_errors = test_errors.clone();
            if request.run_after_build {
                let run_request = ExecutionRequest {
                    project_id: request.project_id.clone(),
                    language,
                    files: current_files.clone(),
                    entry_point: request.entry_point.clone(),
                    phase: ExecutionPhase::Run,
                    timeout_seconds: self.config.run_timeout_secs,
                    allow_network: false,
                    env: Vec::new(),
                };
                let run_result = match self
                    .sandbox
                    .execute_with_retry(run_request, self.config.sandbox_max_retries, cancel.child())
                    .await
                {
                    Ok(result) => result,
                    Err(e) => {
                        result.error_message = Some(e.to_string());
                        return PipelineStatus::InternalError;
                    }
                };
                let run_output = format!("{}\n{}", run_result.stdout, run_result.stderr);
                let phase = PhaseResult::new(PipelinePhase::Execute, run_result.success, run_result.execution_time_ms, run_output)
                    .with_errors(run_result.errors.clone());
                let run_succeeded = run_result.success;
                let run_errors = run_result.errors.clone();
                result.phases.push(phase);
                if !run_succeeded {
                    match self.record_failure(&mut errors, run_errors, PipelineStatus::RuntimeFailed, result) {
                        StepOutcome::Terminate(status) => return status,
                        StepOutcome::Continue => continue,
                    }
                }
            }

            if cancel.is_cancelled() {
                return PipelineStatus::Cancelled;
            }

            // Step 7: verify.
            let build_errors_present = !build_succeeded;
            let verification_input = VerificationInput {
                project_id: &request.project_id,
                analysis: last_analysis.as_ref(),
                test_results: last_test_results.as_ref(),
                build_output: &build_output,
                build_errors_present,
                runtime_errors: &runtime_errors,
                files: &current_files,
                require_tests: self.config.require_tests,
            };
            let verification = match self.gate.verify(verification_input, self.clock.epoch_ms()) {
                Ok(v) => v,
                Err(e) => {
                    result.error_message = Some(e.to_string());
                    return PipelineStatus::InternalError;
                }
            };
            let verify_passed = verification.passed;
            result.phases.push(PhaseResult::new(
                PipelinePhase::Verify,
                verify_passed,
                0,
                format!("score={}", verification.score),
            ));
            if verify_passed {
                result.output_files = Some(current_files.clone());
                result.verification = Some(verification);
                return PipelineStatus::Success;
            }

            errors.extend(verification.issues.iter().map(issue_to_error));
            if k == self.config.max_total_iterations {
                result.verification = Some(verification);
                result.error_message = Some("verification failed after the final iteration".to_string());
                return PipelineStatus::VerificationFailed;
            }
        }

        // Defensive: the loop above always returns by the final iteration's
        // verify step; reached only if max_total_iterations is 0.
        PipelineStatus::VerificationFailed
    }

    /// Append `new_errors` to the cumulative error list and decide whether
    /// the self-correction budget is exhausted. A single shared `errors` list
    /// is checked against `MAX_SELF_CORRECTION_ATTEMPTS` regardless of which
    /// phase is failing.
    fn record_failure(
        &self,
        errors: &mut Vec<ExecutionError>,
        new_errors: Vec<ExecutionError>,
        terminal_status: PipelineStatus,
        result: &mut PipelineResult,
    ) -> StepOutcome {
        errors.extend(new_errors);
        if errors.len() as u32 >= self.config.max_self_correction_attempts {
            result.error_message = Some(format!(
                "{} after {} accumulated error(s)",
                terminal_status,
                errors.len()
            ));
            return StepOutcome::Terminate(terminal_status);
        }
        StepOutcome::Continue
    }
}

/// Render the self-correction prompt: the original prompt, plus (when
/// non-empty) the most recent `tail_len` accumulated errors rendered one per
/// line.
fn render_prompt(original_prompt: &str, errors: &[ExecutionError], tail_len: usize, max_stack_chars: usize) -> String {
    if errors.is_empty() {
        return original_prompt.to_string();
    }
    let tail_start = errors.len().saturating_sub(tail_len);
    let rendered: Vec<String> = errors[tail_start..]
        .iter()
        .map(|e| e.render_for_prompt(max_stack_chars))
        .collect();
    format!("{original_prompt}\n\n--- Errors from previous attempt(s) ---\n{}", rendered.join("\n"))
}

/// Translate a verification issue into the cumulative error history so a
/// failed gate feeds the next generation attempt the same way a failed phase
/// does.
fn issue_to_error(issue: &Issue) -> ExecutionError {
    let error_type = match issue.category {
        VerificationCategory::Security => ExecutionErrorType::Exception,
        VerificationCategory::Tests => ExecutionErrorType::Runtime,
        VerificationCategory::Runtime => ExecutionErrorType::Runtime,
        VerificationCategory::Build => ExecutionErrorType::CompileError,
        VerificationCategory::Quality => ExecutionErrorType::Lint,
    };
    let message = format!("[{}] {}", issue.category, issue.message);
    let mut error = ExecutionError::new(error_type, message);
    if let (Some(file), Some(line)) = (issue.file.clone(), issue.line) {
        error = error.with_location(file, line, 0);
    }
    error
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
