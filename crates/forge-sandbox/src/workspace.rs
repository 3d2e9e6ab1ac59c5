// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Forge Authors

//! Workspace materialization: write a `ProjectFile` set to an on-disk
//! directory that will be bind-mounted into a container.

use crate::error::SandboxError;
use forge_core::ProjectFile;
use std::path::{Path, PathBuf};

/// Write each file's content under `root`, creating intermediate
/// directories. Rejects absolute paths or `..`-escaping paths (the same
/// check `ProjectFile::new` applies at construction, enforced again here in
/// case a caller builds files by another route).
pub fn materialize(root: &Path, files: &[ProjectFile]) -> Result<(), SandboxError> {
    std::fs::create_dir_all(root)?;
    for file in files {
        let path = safe_join(root, &file.path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.content)?;
    }
    Ok(())
}

fn safe_join(root: &Path, relative: &str) -> Result<PathBuf, SandboxError> {
    let rel = Path::new(relative);
    if rel.is_absolute() {
        return Err(SandboxError::InvalidPath(relative.to_string()));
    }
    if rel
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(SandboxError::InvalidPath(relative.to_string()));
    }
    Ok(root.join(rel))
}

/// Recursively remove a workspace directory. Idempotent: missing directories
/// are not an error.
pub fn cleanup(root: &Path) -> Result<(), SandboxError> {
    match std::fs::remove_dir_all(root) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
