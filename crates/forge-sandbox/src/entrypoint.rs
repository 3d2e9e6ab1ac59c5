// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Entrypoint script generation: deterministic `(language, phase) →
//! /workspace/entrypoint.sh` mapping.

use forge_core::{ExecutionPhase, Language};

/// Render the POSIX shell entrypoint for a given language/phase/entry-point
/// combination.
pub fn render(language: Language, phase: ExecutionPhase, entry_point: Option<&str>) -> String {
    let body = command_for(language, phase, entry_point);
    format!("#!/bin/sh\nset -e\n{body}\n")
}

fn command_for(language: Language, phase: ExecutionPhase, entry_point: Option<&str>) -> String {
    use ExecutionPhase::*;
    use Language::*;
    match (language, phase) {
        (Python, StaticAnalysis) => {
            "python -m compileall -q . && python -m pyflakes --json . 2>/dev/null || python -m pyflakes .".to_string()
        }
        (Python, DependencyResolution) => "pip install -q -r requirements.txt 2>/dev/null || true".to_string(),
        (Python, Build) => "python -m compileall -q .".to_string(),
        (Python, Test) => "pytest --tb=short -v".to_string(),
        (Python, Run) => format!("python {}", entry_point.unwrap_or("main.py")),

        (JavaScript, StaticAnalysis) => "npm install --silent && npx eslint --format json .".to_string(),
        (JavaScript, DependencyResolution) => "npm install --silent".to_string(),
        (JavaScript, Build) => "npm run build".to_string(),
        (JavaScript, Test) => "npm test".to_string(),
        (JavaScript, Run) => format!("node {}", entry_point.unwrap_or("index.js")),

        (CSharp, StaticAnalysis) => "dotnet build -warnaserror".to_string(),
        (CSharp, DependencyResolution) => "dotnet restore".to_string(),
        (CSharp, Build) => "dotnet restore && dotnet build -c Release".to_string(),
        (CSharp, Test) => "dotnet test -v normal".to_string(),
        (CSharp, Run) => "dotnet run".to_string(),

        (Go, StaticAnalysis) => "go vet ./... && (golangci-lint run || true)".to_string(),
        (Go, DependencyResolution) => "go mod download".to_string(),
        (Go, Build) => "go build -o app ./...".to_string(),
        (Go, Test) => "go test -v ./...".to_string(),
        (Go, Run) => "go run .".to_string(),

        (Java, StaticAnalysis) => "javac -Xlint:all -d /tmp/static-check *.java".to_string(),
        (Java, DependencyResolution) => ": # no dependency manager configured".to_string(),
        (Java, Build) => "javac -d out *.java".to_string(),
        (Java, Test) => "java -cp out:junit.jar org.junit.runner.JUnitCore AllTests".to_string(),
        (Java, Run) => format!("java -cp out {}", entry_point.unwrap_or("Main")),

        (Rust, StaticAnalysis) => "cargo check --quiet".to_string(),
        (Rust, DependencyResolution) => "cargo fetch --quiet".to_string(),
        (Rust, Build) => "cargo build --quiet".to_string(),
        (Rust, Test) => "cargo test --quiet".to_string(),
        (Rust, Run) => "cargo run --quiet".to_string(),

        (Ruby, StaticAnalysis) => "ruby -wc $(find . -name '*.rb') && (rubocop --format json || true)".to_string(),
        (Ruby, DependencyResolution) => "bundle install --quiet".to_string(),
        (Ruby, Build) => "ruby -wc $(find . -name '*.rb')".to_string(),
        (Ruby, Test) => "bundle exec rspec".to_string(),
        (Ruby, Run) => format!("ruby {}", entry_point.unwrap_or("main.rb")),

        (Php, StaticAnalysis) => "find . -name '*.php' -exec php -l {} \\;".to_string(),
        (Php, DependencyResolution) => "composer install --quiet".to_string(),
        (Php, Build) => "find . -name '*.php' -exec php -l {} \\;".to_string(),
        (Php, Test) => "phpunit".to_string(),
        (Php, Run) => format!("php {}", entry_point.unwrap_or("index.php")),
    }
}

#[cfg(test)]
#[path = "entrypoint_tests.rs"]
mod tests;
