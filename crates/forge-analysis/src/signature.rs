// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Per-language function-signature extraction feeding `TestGenerator`.

use forge_core::Language;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub file: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_hint: Option<String>,
}

const SKIPPED_NAMES: [&str; 3] = ["main", "init", "constructor"];

fn is_skipped(name: &str, return_type: Option<&str>) -> bool {
    if name.starts_with('_') || name.starts_with("test") || name.starts_with("Test") {
        return true;
    }
    if SKIPPED_NAMES.contains(&name) {
        return true;
    }
    if let Some(ret) = return_type {
        if ret == name {
            return true;
        }
    }
    false
}

#[allow(clippy::expect_used)]
fn python_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?P<async>async\s+)?def\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?:->\s*(?P<ret>[\w\[\], ]+))?\s*:").expect("constant regex pattern is valid"))
}

#[allow(clippy::expect_used)]
fn js_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?P<export>export\s+)?(?P<async>async\s+)?function\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)").expect("constant regex pattern is valid"))
}

#[allow(clippy::expect_used)]
fn rust_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:pub\s+)?(?P<async>async\s+)?fn\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?:->\s*(?P<ret>[\w:<>, ]+))?\s*\{").expect("constant regex pattern is valid"))
}

#[allow(clippy::expect_used)]
fn ruby_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*def\s+(?P<name>\w+[?!]?)(?:\((?P<params>[^)]*)\))?").expect("constant regex pattern is valid"))
}

#[allow(clippy::expect_used)]
fn php_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*(?:public\s+|private\s+|protected\s+|static\s+)*function\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)").expect("constant regex pattern is valid"))
}

/// C-family `type name` convention: `<ret> name(<type> p1, <type> p2)`.
#[allow(clippy::expect_used)]
fn typed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^\s*(?:public\s+|private\s+|protected\s+|static\s+)*(?P<ret>[\w<>\[\]\.]+)\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)",
        )
        .expect("constant regex pattern is valid")
    })
}

/// Go declares its return type after the parameter list: `func name(<type>
/// p1, <type> p2) <ret> {`.
#[allow(clippy::expect_used)]
fn go_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*func\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?P<ret>[\w\[\]\.]*)\s*\{")
            .expect("constant regex pattern is valid")
    })
}

fn split_params(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        Vec::new()
    } else {
        raw.split(',').map(str::trim).filter(|p| !p.is_empty()).collect()
    }
}

/// Dynamically-typed languages write `name`, `name: type`, or `name=default`.
fn parse_dynamic_params(raw: &str) -> Vec<Parameter> {
    split_params(raw)
        .into_iter()
        .map(|p| {
            let p = p.split('=').next().unwrap_or(p).trim();
            if let Some((name, ty)) = p.split_once(':') {
                Parameter {
                    name: name.trim().trim_start_matches('*').trim_start_matches('&').to_string(),
                    type_hint: Some(ty.trim().to_string()),
                }
            } else {
                Parameter {
                    name: p.trim_start_matches('*').trim_start_matches('&').to_string(),
                    type_hint: None,
                }
            }
        })
        .filter(|p| !p.name.is_empty() && p.name != "self" && p.name != "this")
        .collect()
}

/// C-family/Go: `type name` ordering.
fn parse_typed_params(raw: &str) -> Vec<Parameter> {
    split_params(raw)
        .into_iter()
        .filter_map(|p| {
            let tokens: Vec<&str> = p.split_whitespace().collect();
            match tokens.as_slice() {
                [ty, name] => Some(Parameter {
                    name: name.to_string(),
                    type_hint: Some(ty.to_string()),
                }),
                [name, ty] if tokens.len() == 2 => Some(Parameter {
                    name: name.to_string(),
                    type_hint: Some(ty.to_string()),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Extract every non-skipped function/method signature from `content`.
pub fn extract(language: Language, file: &str, content: &str) -> Vec<FunctionSignature> {
    match language {
        Language::Python => extract_with(python_re(), file, content, parse_dynamic_params, false),
        Language::JavaScript => extract_with(js_re(), file, content, parse_dynamic_params, false),
        Language::Rust => extract_with(rust_re(), file, content, parse_typed_params, true),
        Language::Ruby => extract_with(ruby_re(), file, content, parse_dynamic_params, false),
        Language::Php => extract_with(php_re(), file, content, parse_dynamic_params, false),
        Language::Go => extract_with(go_re(), file, content, parse_typed_params, true),
        Language::CSharp | Language::Java => extract_with(typed_re(), file, content, parse_typed_params, true),
    }
}

fn extract_with(
    re: &Regex,
    file: &str,
    content: &str,
    parse_params: fn(&str) -> Vec<Parameter>,
    _has_typed_return: bool,
) -> Vec<FunctionSignature> {
    let mut signatures = Vec::new();
    for caps in re.captures_iter(content) {
        let name = caps.name("name").map(|m| m.as_str().to_string()).unwrap_or_default();
        let return_type = caps
            .name("ret")
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        if is_skipped(&name, return_type.as_deref()) {
            continue;
        }
        let params = caps.name("params").map(|m| m.as_str()).unwrap_or("");
        let is_async = caps.name("async").is_some();
        signatures.push(FunctionSignature {
            name,
            file: file.to_string(),
            parameters: parse_params(params),
            return_type,
            is_async,
        });
    }
    signatures
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
