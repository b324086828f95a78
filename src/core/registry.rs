//! Workspace package registry
//!
//! Discovers every package of a repository (through its workspace manifest, or
//! by scanning the tree for package.json files) and persists the result as a
//! JSON index so later runs can skip discovery.

use crate::error::{FlattenError, OptionExt, Result, ResultExt};
use crate::models::selection::SelectionPolicy;
use crate::models::workspace::{WorkspaceIndexEntry, WorkspacePackage};
use crate::parsers::package_json::PackageJsonParser;
use crate::parsers::workspace_manifest::WorkspaceManifest;
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Directory pruning rules applied while discovering packages
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    pub directory_exclusions: BTreeSet<String>,
    pub prefix_exclusions: Vec<String>,
}

impl DiscoveryOptions {
    /// Same directory rules as the traversal policy, regardless of include-all
    pub fn from_policy(policy: &SelectionPolicy) -> Self {
        Self {
            directory_exclusions: policy.directory_exclusions.clone(),
            prefix_exclusions: policy.prefix_exclusions.clone(),
        }
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.directory_exclusions.contains(name)
            || self
                .prefix_exclusions
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

/// Mapping from package name to package record for one repository
#[derive(Debug, Clone)]
pub struct WorkspaceRegistry {
    root: PathBuf,
    packages: BTreeMap<String, WorkspacePackage>,
}

impl WorkspaceRegistry {
    /// An empty registry rooted at `root`
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packages: BTreeMap::new(),
        }
    }

    /// Discover all packages of the repository at `root`
    pub fn discover(root: &Path, options: &DiscoveryOptions) -> Self {
        let manifests = match WorkspaceManifest::load(root) {
            Ok(Some(manifest)) => {
                info!(
                    "Using workspace manifest {} ({} patterns)",
                    manifest.source.display(),
                    manifest.include.len()
                );
                match manifest.package_manifests(root, |name| options.is_excluded_dir(name)) {
                    Ok(found) => found,
                    Err(err) => {
                        warn!("{}", err.user_message());
                        Self::scan_package_manifests(root, options)
                    }
                }
            }
            Ok(None) => {
                debug!("No workspace manifest in {}, scanning repository", root.display());
                Self::scan_package_manifests(root, options)
            }
            Err(err) => {
                warn!("{}", err.user_message());
                Self::scan_package_manifests(root, options)
            }
        };

        let mut registry = Self::empty(root);
        for manifest_path in manifests {
            match Self::read_package(&manifest_path) {
                Ok(package) => registry.insert(package),
                Err(err) => warn!("Skipping package: {}", err.user_message()),
            }
        }

        info!("Discovered {} workspace packages", registry.len());
        registry
    }

    /// Every package.json below `root`, pruning excluded directories
    fn scan_package_manifests(root: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !options.is_excluded_dir(&entry.file_name().to_string_lossy())
            });

        let mut manifests = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && entry.file_name() == "package.json" {
                        manifests.push(entry.into_path());
                    }
                }
                Err(err) => debug!("Skipping unreadable entry during package scan: {}", err),
            }
        }
        manifests
    }

    fn read_package(manifest_path: &Path) -> Result<WorkspacePackage> {
        let manifest = PackageJsonParser::parse_file(manifest_path)?;
        let name = PackageJsonParser::require_name(&manifest, manifest_path)?;
        let directory = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_error(|| FlattenError::invalid_package_json(manifest_path, "no parent directory"))?;

        Ok(WorkspacePackage::new(
            name,
            directory,
            manifest.description.unwrap_or_default(),
            manifest.exports,
        ))
    }

    /// Register a package; a later package with the same name replaces the earlier one
    pub fn insert(&mut self, package: WorkspacePackage) {
        match self.packages.entry(package.name.clone()) {
            btree_map::Entry::Occupied(mut existing) => {
                if existing.get().directory != package.directory {
                    warn!(
                        "Duplicate package name '{}': {} replaces {}",
                        package.name,
                        package.directory.display(),
                        existing.get().directory.display()
                    );
                }
                existing.insert(package);
            }
            btree_map::Entry::Vacant(slot) => {
                debug!("Registered package '{}' at {}", package.name, package.directory.display());
                slot.insert(package);
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<&WorkspacePackage> {
        self.packages.get(name)
    }

    /// Package named by an import specifier, including deep imports like `@scope/pkg/sub`
    pub fn lookup_specifier(&self, specifier: &str) -> Option<&WorkspacePackage> {
        if let Some(package) = self.packages.get(specifier) {
            return Some(package);
        }
        let name = package_name_of(specifier)?;
        self.packages.get(name)
    }

    pub fn packages(&self) -> impl Iterator<Item = &WorkspacePackage> {
        self.packages.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Serialized form of the registry, ordered by package name
    pub fn to_index(&self) -> Vec<WorkspaceIndexEntry> {
        self.packages
            .values()
            .map(|package| WorkspaceIndexEntry::from_package(package, &self.root))
            .collect()
    }

    /// Write the index artifact as pretty JSON
    pub fn save_index(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_index())?;
        fs::write(path, json + "\n").with_file_context(path)?;
        info!("Wrote workspace index with {} packages to {}", self.len(), path.display());
        Ok(())
    }

    /// Read an index artifact, failing on a missing or malformed file
    pub fn read_index(root: &Path, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| FlattenError::index_cache(path, e.to_string()))?;
        let entries: Vec<WorkspaceIndexEntry> = serde_json::from_str(&content)
            .map_err(|e| FlattenError::index_cache(path, e.to_string()))?;

        let mut registry = Self::empty(root);
        for entry in entries {
            registry.insert(entry.into_package(root));
        }
        Ok(registry)
    }

    /// Read an index artifact, degrading to an empty registry
    pub fn load_index(root: &Path, path: &Path) -> Self {
        match Self::read_index(root, path) {
            Ok(registry) => {
                debug!("Loaded {} packages from {}", registry.len(), path.display());
                registry
            }
            Err(err) => {
                warn!("{}", err.user_message());
                Self::empty(root)
            }
        }
    }
}

/// Package-name portion of a bare specifier (`pkg/sub` -> `pkg`, `@s/pkg/sub` -> `@s/pkg`)
pub fn package_name_of(specifier: &str) -> Option<&str> {
    let mut parts = specifier.splitn(3, '/');
    let first = parts.next().filter(|p| !p.is_empty())?;
    if first.starts_with('@') {
        let second = parts.next().filter(|p| !p.is_empty())?;
        Some(&specifier[..first.len() + 1 + second.len()])
    } else {
        Some(first)
    }
}
