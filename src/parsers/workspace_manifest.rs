//! Workspace manifest parsing
//!
//! A workspace is declared by `pnpm-workspace.yaml` (`packages:` list) or, when
//! that file is absent, by the root package.json `workspaces` field. Patterns
//! prefixed with `!` exclude matched package directories.

use crate::error::{FlattenError, Result};
use crate::parsers::package_json::PackageJsonParser;
use crate::utils::fs::to_forward_slashes;
use glob::{MatchOptions, Pattern};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the pnpm workspace manifest
pub const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

#[derive(Debug, Deserialize)]
struct PnpmWorkspaceFile {
    packages: Option<serde_yaml::Value>,
}

/// A parsed workspace manifest
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceManifest {
    /// File the patterns were read from
    pub source: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl WorkspaceManifest {
    /// Build a manifest from raw patterns
    pub fn from_patterns(source: impl Into<PathBuf>, patterns: Vec<String>) -> Self {
        let mut include = Vec::new();
        let mut exclude = Vec::new();
        for pattern in patterns {
            let pattern = pattern.trim();
            if pattern.is_empty() {
                continue;
            }
            match pattern.strip_prefix('!') {
                Some(negated) => exclude.push(negated.trim_start_matches("./").to_string()),
                None => include.push(pattern.trim_start_matches("./").to_string()),
            }
        }
        Self {
            source: source.into(),
            include,
            exclude,
        }
    }

    /// Locate and parse the workspace manifest of `root`.
    ///
    /// `Ok(None)` means the repository declares no workspace. An error means a
    /// manifest exists but is structurally invalid.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let pnpm_path = root.join(PNPM_WORKSPACE_FILE);
        if pnpm_path.is_file() {
            return Self::parse_pnpm_file(&pnpm_path).map(Some);
        }

        let package_json = root.join("package.json");
        if package_json.is_file() {
            let manifest = PackageJsonParser::parse_file(&package_json)?;
            if let Some(patterns) = manifest.workspaces {
                return Ok(Some(Self::from_patterns(package_json, patterns)));
            }
        }

        Ok(None)
    }

    /// Parse a pnpm-workspace.yaml file
    pub fn parse_pnpm_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FlattenError::file_read(path, e))?;
        Self::parse_pnpm(&content, path)
    }

    /// Parse pnpm-workspace.yaml content
    pub fn parse_pnpm(content: &str, path: &Path) -> Result<Self> {
        let file: PnpmWorkspaceFile =
            serde_yaml::from_str(content).map_err(|e| FlattenError::yaml_parse_error(path, e))?;

        let sequence = match file.packages {
            Some(serde_yaml::Value::Sequence(sequence)) => sequence,
            Some(_) => {
                return Err(FlattenError::workspace_manifest(
                    path,
                    "'packages' is not a list",
                ))
            }
            None => {
                return Err(FlattenError::workspace_manifest(
                    path,
                    "missing 'packages' field",
                ))
            }
        };

        let mut patterns = Vec::with_capacity(sequence.len());
        for value in sequence {
            match value {
                serde_yaml::Value::String(pattern) => patterns.push(pattern),
                other => {
                    return Err(FlattenError::workspace_manifest(
                        path,
                        format!("package pattern is not a string: {:?}", other),
                    ))
                }
            }
        }

        Ok(Self::from_patterns(path, patterns))
    }

    /// Sorted, de-duplicated package.json files matched by the include patterns.
    ///
    /// Matches with a path component rejected by `is_excluded_dir` are dropped, as
    /// are package directories matched by a `!` pattern.
    pub fn package_manifests<F>(&self, root: &Path, is_excluded_dir: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(&str) -> bool,
    {
        let exclusions = self
            .exclude
            .iter()
            .map(|pattern| Pattern::new(pattern.trim_end_matches('/')))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let escaped_root = Pattern::escape(&root.to_string_lossy());
        let mut manifests = BTreeSet::new();

        for pattern in &self.include {
            let full = format!("{}/{}/package.json", escaped_root, pattern.trim_end_matches('/'));
            for entry in glob::glob(&full)? {
                let manifest = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        debug!("Skipping unreadable workspace match: {}", e);
                        continue;
                    }
                };
                let Some(directory) = manifest.parent() else {
                    continue;
                };
                let relative = directory.strip_prefix(root).unwrap_or(directory);
                let relative_str = to_forward_slashes(relative);

                if relative
                    .components()
                    .any(|c| is_excluded_dir(&c.as_os_str().to_string_lossy()))
                {
                    debug!("Ignoring workspace match inside excluded directory: {}", relative_str);
                    continue;
                }
                if exclusions.iter().any(|p| {
                    p.matches_with(
                        &relative_str,
                        MatchOptions {
                            require_literal_separator: true,
                            ..MatchOptions::new()
                        },
                    )
                }) {
                    debug!("Workspace match excluded by negated pattern: {}", relative_str);
                    continue;
                }
                manifests.insert(manifest);
            }
        }

        Ok(manifests.into_iter().collect())
    }
}
