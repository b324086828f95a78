//! Run orchestration
//!
//! Builds the registry once, turns the selection mode into target roots,
//! traverses each root in order and writes the assembled artifact.

use crate::core::assembler::{write_artifact, OutputAssembler};
use crate::core::registry::{DiscoveryOptions, WorkspaceRegistry};
use crate::core::resolver::{DependencyResolver, ResolverConfig};
use crate::core::traversal::Traversal;
use crate::error::{FlattenError, Result};
use crate::models::config::Settings;
use crate::models::selection::{SelectionMode, SelectionPolicy};
use crate::output::progress::ProgressReporter;
use crate::output::writers::STDOUT_PATH;
use crate::utils::repo::find_repository_root;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of one flatten run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub repo_root: PathBuf,
    pub package_count: usize,
    /// Target roots handed to the traversal engine, in order
    pub target_roots: Vec<PathBuf>,
    /// Target roots whose traversal failed and were left out of the totals
    pub failed_targets: Vec<PathBuf>,
    /// Requested package names absent from the registry
    pub missing_packages: Vec<String>,
    pub processed_file_count: usize,
    pub skipped_file_count: usize,
    pub output_bytes: usize,
    pub artifact: Option<PathBuf>,
    pub index_file: Option<PathBuf>,
}

/// Drives one run from settings to the written artifact
pub struct Flattener<'a> {
    settings: &'a Settings,
    working_dir: PathBuf,
    progress: &'a ProgressReporter,
}

impl<'a> Flattener<'a> {
    pub fn new(
        settings: &'a Settings,
        working_dir: impl Into<PathBuf>,
        progress: &'a ProgressReporter,
    ) -> Self {
        Self {
            settings,
            working_dir: working_dir.into(),
            progress,
        }
    }

    /// Execute the run
    pub fn run(&self) -> Result<RunReport> {
        let repo_root = self.repository_root()?;
        let mut report = RunReport {
            repo_root: repo_root.clone(),
            ..RunReport::default()
        };

        let explicit_output = self.settings.output_file.as_deref().map(|p| self.absolutize(p));
        let default_output = self.default_output_path(&repo_root);
        let policy = self.selection_policy(&repo_root, explicit_output.as_deref(), &default_output);

        let mode = self.settings.selection_mode();
        // Explicit files are validated before any discovery work
        let explicit_files = match &mode {
            SelectionMode::Files { paths, .. } => self.validate_files(paths)?,
            _ => Vec::new(),
        };

        let registry = self.build_registry(&repo_root, &policy, &mut report);
        report.package_count = registry.len();

        report.target_roots = match &mode {
            SelectionMode::Repository => vec![repo_root.clone()],
            SelectionMode::Packages(names) => {
                self.package_targets(&registry, names, &mut report.missing_packages)
            }
            SelectionMode::Files {
                with_dependencies: true,
                ..
            } => {
                let config = ResolverConfig {
                    search_exclusions: DiscoveryOptions::from_policy(&policy),
                };
                DependencyResolver::new(&registry, config).expand_targets(&explicit_files)?
            }
            SelectionMode::Files { .. } => explicit_files,
        };
        info!("Selected {} target root(s)", report.target_roots.len());

        let traversal = Traversal::new(&policy);
        let mut assembler = OutputAssembler::new();
        for target in &report.target_roots {
            let spinner = self
                .progress
                .create_spinner(&format!("Flattening {}", policy.relative_path(target)));
            match traversal.select(target) {
                Ok(result) => assembler.absorb(result),
                Err(err) => {
                    warn!("Skipping target {}: {}", target.display(), err.user_message());
                    report.failed_targets.push(target.clone());
                }
            }
            ProgressReporter::finish_spinner(spinner);
        }

        let assembled = assembler.finish();
        report.processed_file_count = assembled.processed_file_count;
        report.skipped_file_count = assembled.skipped_file_count;
        report.output_bytes = assembled.content.len();
        report.artifact = write_artifact(&assembled, explicit_output.as_deref(), &default_output)?;

        Ok(report)
    }

    /// `--root` when given, otherwise discovered from the working directory
    pub fn repository_root(&self) -> Result<PathBuf> {
        match &self.settings.root {
            Some(root) => {
                let root = self.absolutize(root);
                if !root.exists() {
                    return Err(FlattenError::invalid_path(root));
                }
                if !root.is_dir() {
                    return Err(FlattenError::not_file_or_directory(root));
                }
                root.canonicalize().map_err(FlattenError::io_error)
            }
            None => find_repository_root(&self.working_dir),
        }
    }

    /// `<repo-dir-name>_flattened.txt` in the working directory
    pub fn default_output_path(&self, repo_root: &Path) -> PathBuf {
        let name = repo_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string());
        self.working_dir.join(format!("{}_flattened.txt", name))
    }

    fn selection_policy(
        &self,
        repo_root: &Path,
        explicit_output: Option<&Path>,
        default_output: &Path,
    ) -> SelectionPolicy {
        let policy = self.settings.selection_policy(repo_root);
        match explicit_output {
            Some(path) if path == Path::new(STDOUT_PATH) => policy,
            Some(path) => policy.exclude_path(canonical_destination(path)),
            None => {
                let policy = policy.exclude_path(canonical_destination(default_output));
                match default_output.file_name() {
                    Some(name) => policy.exclude_file(name.to_string_lossy().into_owned()),
                    None => policy,
                }
            }
        }
    }

    fn validate_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        paths
            .iter()
            .map(|path| {
                let path = self.absolutize(path);
                if !path.exists() {
                    return Err(FlattenError::invalid_path(path));
                }
                path.canonicalize().map_err(FlattenError::io_error)
            })
            .collect()
    }

    fn build_registry(
        &self,
        repo_root: &Path,
        policy: &SelectionPolicy,
        report: &mut RunReport,
    ) -> WorkspaceRegistry {
        let index_path = self.settings.index_path(repo_root);
        if self.settings.use_cached_index {
            return WorkspaceRegistry::load_index(repo_root, &index_path);
        }

        let spinner = self.progress.create_spinner("Discovering workspace packages");
        let registry = WorkspaceRegistry::discover(repo_root, &DiscoveryOptions::from_policy(policy));
        ProgressReporter::finish_spinner(spinner);

        if self.settings.write_index && !registry.is_empty() {
            match registry.save_index(&index_path) {
                Ok(()) => report.index_file = Some(index_path),
                Err(err) => warn!("Could not write workspace index: {}", err.user_message()),
            }
        }
        registry
    }

    fn package_targets(
        &self,
        registry: &WorkspaceRegistry,
        names: &[String],
        missing: &mut Vec<String>,
    ) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for name in names {
            match registry.get(name) {
                Some(package) => {
                    if seen.insert(package.directory.clone()) {
                        targets.push(package.directory.clone());
                    }
                }
                None => {
                    warn!("Package '{}' not found in workspace", name);
                    debug!(
                        "Known packages: {}",
                        registry.names().collect::<Vec<_>>().join(", ")
                    );
                    missing.push(name.clone());
                }
            }
        }
        targets
    }

    fn absolutize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path == Path::new(STDOUT_PATH) {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

/// Canonical form of an artifact path that may not exist yet
fn canonical_destination(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
