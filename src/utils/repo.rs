//! Repository root discovery

use crate::error::{FlattenError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Locate the repository root containing `start`
///
/// Asks `git rev-parse --show-toplevel` first and falls back to the nearest
/// ancestor holding a `.git` entry, so checkouts work without git installed.
pub fn find_repository_root(start: &Path) -> Result<PathBuf> {
    if !start.exists() {
        return Err(FlattenError::invalid_path(start));
    }

    let start = start.canonicalize().map_err(FlattenError::io_error)?;
    let dir = if start.is_file() {
        start.parent().map(Path::to_path_buf).unwrap_or_else(|| start.clone())
    } else {
        start.clone()
    };

    if let Some(root) = git_toplevel(&dir) {
        return Ok(root);
    }

    dir.ancestors()
        .find(|ancestor| ancestor.join(".git").exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| FlattenError::not_a_repository(&dir))
}

fn git_toplevel(dir: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        tracing::debug!(
            "git rev-parse failed in {}: {}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if toplevel.is_empty() {
        return None;
    }
    PathBuf::from(toplevel).canonicalize().ok()
}
