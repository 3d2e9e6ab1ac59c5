// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

use super::*;
use serial_test::serial;
use std::io::Write;

fn clear_env() {
    for var in [
        "FORGE_CONFIG_PATH",
        "FORGE_WORKSPACE_ROOT",
        "FORGE_MAX_CONCURRENT_EXECUTIONS",
        "FORGE_MEMORY_LIMIT_MB",
        "FORGE_CPU_LIMIT",
        "FORGE_PIDS_LIMIT",
        "FORGE_GENERATION_ENDPOINT",
        "FORGE_GENERATION_TIMEOUT_SECS",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn from_env_with_nothing_configured_matches_defaults() {
    clear_env();
    // Point at a config file that does not exist so the toml overlay is a no-op.
    std::env::set_var("FORGE_CONFIG_PATH", "/nonexistent/forge.toml");

    let config = DaemonConfig::from_env();
    let defaults = DaemonConfig::default();

    assert_eq!(config.max_concurrent_executions, defaults.max_concurrent_executions);
    assert_eq!(config.generation_endpoint, None);
    clear_env();
}

#[test]
#[serial]
fn toml_file_overlays_defaults() {
    clear_env();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("forge.toml");
    let mut file = std::fs::File::create(&path).expect("create forge.toml");
    writeln!(
        file,
        r#"
        max_concurrent_executions = 9
        generation_endpoint = "http://localhost:9999/generate"
        "#
    )
    .expect("write forge.toml");
    std::env::set_var("FORGE_CONFIG_PATH", &path);

    let config = DaemonConfig::from_env();

    assert_eq!(config.max_concurrent_executions, 9);
    assert_eq!(config.generation_endpoint.as_deref(), Some("http://localhost:9999/generate"));
    clear_env();
}

#[test]
#[serial]
fn env_var_wins_over_toml_file() {
    clear_env();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("forge.toml");
    std::fs::write(&path, "max_concurrent_executions = 9\n").expect("write forge.toml");
    std::env::set_var("FORGE_CONFIG_PATH", &path);
    std::env::set_var("FORGE_MAX_CONCURRENT_EXECUTIONS", "3");

    let config = DaemonConfig::from_env();

    assert_eq!(config.max_concurrent_executions, 3);
    clear_env();
}

#[test]
#[serial]
fn unparseable_toml_file_is_ignored() {
    clear_env();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("forge.toml");
    std::fs::write(&path, "this is not valid toml {{{").expect("write forge.toml");
    std::env::set_var("FORGE_CONFIG_PATH", &path);

    let config = DaemonConfig::from_env();

    assert_eq!(config.max_concurrent_executions, DaemonConfig::default().max_concurrent_executions);
    clear_env();
}
