//! File selection data structures

use crate::utils::fs::to_forward_slashes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directory names pruned from every traversal
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "node_modules"];

/// File names never flattened
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    "package-lock.json",
    "npm-shrinkwrap.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
];

/// Name prefixes excluded for both files and directories
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["."];

/// Default size threshold for flattened files
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024;

/// What the caller asked to flatten
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// The whole repository
    Repository,
    /// Named workspace packages
    Packages(Vec<String>),
    /// Explicit files, optionally expanded with their resolved imports
    Files {
        paths: Vec<PathBuf>,
        with_dependencies: bool,
    },
}

/// Exclusion and filtering rules for one traversal
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    pub size_threshold_bytes: u64,
    pub include_all: bool,
    pub name_exclusions: BTreeSet<String>,
    pub directory_exclusions: BTreeSet<String>,
    pub prefix_exclusions: Vec<String>,
    /// Absolute paths never admitted, whatever the include-all override
    pub path_exclusions: BTreeSet<PathBuf>,
    pub repo_root: PathBuf,
}

impl SelectionPolicy {
    /// Policy with the process-wide default exclusions
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            size_threshold_bytes: DEFAULT_MAX_FILE_SIZE,
            include_all: false,
            name_exclusions: DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect(),
            directory_exclusions: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            prefix_exclusions: DEFAULT_EXCLUDED_PREFIXES.iter().map(|s| s.to_string()).collect(),
            path_exclusions: BTreeSet::new(),
            repo_root: repo_root.into(),
        }
    }

    pub fn with_size_threshold(mut self, bytes: u64) -> Self {
        self.size_threshold_bytes = bytes;
        self
    }

    pub fn with_include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    pub fn exclude_directory(mut self, name: impl Into<String>) -> Self {
        self.directory_exclusions.insert(name.into());
        self
    }

    pub fn exclude_file(mut self, name: impl Into<String>) -> Self {
        self.name_exclusions.insert(name.into());
        self
    }

    pub fn exclude_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path_exclusions.insert(path.into());
        self
    }

    fn has_excluded_prefix(&self, name: &str) -> bool {
        self.prefix_exclusions.iter().any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Directory pruning rule, ignoring the include-all override
    pub fn is_excluded_dir_name(&self, name: &str) -> bool {
        self.directory_exclusions.contains(name) || self.has_excluded_prefix(name)
    }

    /// Whether a directory with this name is pruned
    pub fn prunes_directory(&self, name: &str) -> bool {
        !self.include_all && self.is_excluded_dir_name(name)
    }

    /// Whether a file with this base name is rejected by name
    pub fn rejects_file_name(&self, name: &str) -> bool {
        !self.include_all && (self.name_exclusions.contains(name) || self.has_excluded_prefix(name))
    }

    /// Whether this exact file is rejected
    pub fn rejects_path(&self, path: &Path) -> bool {
        self.path_exclusions.contains(path)
    }

    /// Whether a file of this size is rejected
    pub fn rejects_size(&self, size: u64) -> bool {
        !self.include_all && size > self.size_threshold_bytes
    }

    /// Path relative to the repository root, forward-slash separated
    ///
    /// Paths outside the root keep their absolute form.
    pub fn relative_path(&self, path: &Path) -> String {
        let Ok(relative) = path.strip_prefix(&self.repo_root) else {
            return path.to_string_lossy().replace('\\', "/");
        };
        let joined = to_forward_slashes(relative);
        if joined.is_empty() {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| ".".to_string())
        } else {
            joined
        }
    }
}

/// A filesystem entry seen during one traversal pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    pub absolute_path: PathBuf,
    pub relative_path: String,
    pub size_in_bytes: u64,
    pub is_directory: bool,
}

/// Output and accounting for one target root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub output: String,
    pub processed_file_count: usize,
    pub skipped_file_count: usize,
}

impl SelectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}
