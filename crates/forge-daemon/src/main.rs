// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! `forge-daemon`: runs the job queue and worker pool described in
//! spec.md §4.7. No HTTP/CLI transport is implemented here (out of scope
//! per spec.md §1) — this binary either drains one `PipelineRequest` given
//! as a JSON file path, or runs as a long-lived service until a shutdown
//! signal arrives, for an external transport to embed via the `forge_daemon`
//! library crate.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use forge_core::{CancelToken, PipelineRequest};
use forge_daemon::{DaemonConfig, Runtime};
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arg = std::env::args().nth(1);
    if matches!(arg.as_deref(), Some("--help" | "-h")) {
        print_help();
        return Ok(());
    }
    if matches!(arg.as_deref(), Some("--version" | "-V")) {
        println!("forge-daemon {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    setup_logging();

    let config = DaemonConfig::from_env();
    info!(workspace_root = %config.workspace_root.display(), "starting forge-daemon");
    let runtime = Runtime::start(&config);

    match arg {
        Some(path) => run_one_shot(runtime, &path).await,
        None => run_service(runtime).await,
    }
}

/// Read one `PipelineRequest` from `path`, submit it, wait for a terminal
/// result, print it as JSON on stdout, and exit with a status code that
/// reflects pipeline success.
async fn run_one_shot(runtime: Runtime, path: &str) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let request: PipelineRequest = serde_json::from_str(&raw)?;

    let cancel = CancelToken::new();
    let id = runtime.submit(request, None, cancel).await.map_err(|e| {
        error!(error = %e, "failed to submit request");
        e
    })?;
    info!(job_id = %id, "request submitted");

    let result = runtime
        .await_result(&id, Duration::from_millis(500))
        .await
        .ok_or_else(|| anyhow::anyhow!("job {id} vanished before completing"))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    runtime.shutdown().await;

    if matches!(result.status, forge_core::PipelineStatus::Success) {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

/// Run until SIGTERM/SIGINT, for a caller that submits work through the
/// library API (e.g. an external transport embedding this crate).
async fn run_service(runtime: Runtime) -> anyhow::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!("forge-daemon ready");
    println!("READY");

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    runtime.shutdown().await;
    info!("forge-daemon stopped");
    Ok(())
}

fn print_help() {
    println!("forge-daemon {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Agentic Execution Core: job queue + worker pool.");
    println!();
    println!("USAGE:");
    println!("    forge-daemon                 run as a long-lived service until SIGTERM/SIGINT");
    println!("    forge-daemon <request.json>   submit one PipelineRequest and print the result");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -V, --version    Print version information");
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
