//! Workspace package data structures

use crate::utils::fs::to_forward_slashes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A package discovered inside the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspacePackage {
    /// Manifest-declared package name
    pub name: String,

    /// Absolute directory containing the manifest
    pub directory: PathBuf,

    /// Manifest description, empty when absent
    pub description: String,

    /// `exports` field normalized to subpath -> target
    pub declared_exports: BTreeMap<String, Value>,
}

impl WorkspacePackage {
    /// Create a package record
    pub fn new(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
        description: impl Into<String>,
        declared_exports: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            description: description.into(),
            declared_exports,
        }
    }

    /// Directory relative to the repository root, forward-slash separated
    pub fn relative_directory(&self, root: &Path) -> String {
        let relative = self.directory.strip_prefix(root).unwrap_or(&self.directory);
        let joined = to_forward_slashes(relative);
        if joined.is_empty() {
            ".".to_string()
        } else {
            joined
        }
    }
}

/// One record of the workspace index cache artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceIndexEntry {
    pub name: String,
    /// Relative to the repository root, forward slashes
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exports: BTreeMap<String, Value>,
}

impl WorkspaceIndexEntry {
    /// Build the serialized form of a package
    pub fn from_package(package: &WorkspacePackage, root: &Path) -> Self {
        Self {
            name: package.name.clone(),
            path: package.relative_directory(root),
            description: package.description.clone(),
            exports: package.declared_exports.clone(),
        }
    }

    /// Rebuild a package rooted at `root`
    pub fn into_package(self, root: &Path) -> WorkspacePackage {
        let directory = if self.path == "." || self.path.is_empty() {
            root.to_path_buf()
        } else {
            self.path.split('/').fold(root.to_path_buf(), |dir, part| dir.join(part))
        };
        WorkspacePackage::new(self.name, directory, self.description, self.exports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_directory_uses_forward_slashes() {
        let root = PathBuf::from("/repo");
        let package = WorkspacePackage::new(
            "@acme/ui",
            root.join("packages").join("ui"),
            "",
            BTreeMap::new(),
        );
        assert_eq!(package.relative_directory(&root), "packages/ui");

        let root_package = WorkspacePackage::new("root", root.clone(), "", BTreeMap::new());
        assert_eq!(root_package.relative_directory(&root), ".");
    }

    #[test]
    fn test_index_entry_round_trip() {
        let root = PathBuf::from("/repo");
        let mut exports = BTreeMap::new();
        exports.insert(".".to_string(), Value::String("./index.js".to_string()));
        let package = WorkspacePackage::new("pkg-a", root.join("pkg-a"), "helpers", exports);

        let entry = WorkspaceIndexEntry::from_package(&package, &root);
        assert_eq!(entry.path, "pkg-a");
        assert_eq!(entry.into_package(&root), package);
    }
}
