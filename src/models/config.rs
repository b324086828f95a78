//! Configuration-related data structures

use crate::models::selection::{SelectionMode, SelectionPolicy, DEFAULT_MAX_FILE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default file name of the workspace index artifact
pub const DEFAULT_INDEX_FILE: &str = ".workspace-index.json";

/// Main configuration settings for Flattener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Repository root (discovered when not set)
    pub root: Option<PathBuf>,

    /// Workspace packages to flatten by name
    pub packages: Vec<String>,

    /// Explicit files to flatten
    pub files: Vec<PathBuf>,

    /// Expand explicit files with the files defining their imports
    pub with_dependencies: bool,

    /// Output file path (defaults to a name derived from the repository)
    pub output_file: Option<PathBuf>,

    /// Files larger than this are skipped
    pub max_file_size: u64,

    /// Disable every exclusion, size and binary filter
    pub include_all: bool,

    /// Directory names pruned in addition to the built-in ones
    pub exclude_dirs: Vec<String>,

    /// File names skipped in addition to the built-in ones
    pub exclude_files: Vec<String>,

    /// Write the workspace index after discovery
    pub write_index: bool,

    /// Read package locations from the workspace index instead of discovering them
    pub use_cached_index: bool,

    /// Workspace index file name, relative to the repository root
    pub index_file: PathBuf,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress spinners
    pub show_progress: bool,

    /// Format of the run summary (text, json)
    pub summary_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            packages: Vec::new(),
            files: Vec::new(),
            with_dependencies: false,
            output_file: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            include_all: false,
            exclude_dirs: Vec::new(),
            exclude_files: Vec::new(),
            write_index: true,
            use_cached_index: false,
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
            summary_format: OutputFormat::Text,
        }
    }
}

/// Supported summary formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid summary format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl Settings {
    /// Selection mode implied by the configured targets
    pub fn selection_mode(&self) -> SelectionMode {
        if !self.files.is_empty() {
            SelectionMode::Files {
                paths: self.files.clone(),
                with_dependencies: self.with_dependencies,
            }
        } else if !self.packages.is_empty() {
            SelectionMode::Packages(self.packages.clone())
        } else {
            SelectionMode::Repository
        }
    }

    /// Traversal policy for a repository rooted at `repo_root`
    pub fn selection_policy(&self, repo_root: &Path) -> SelectionPolicy {
        let mut policy = SelectionPolicy::new(repo_root)
            .with_size_threshold(self.max_file_size)
            .with_include_all(self.include_all);
        for dir in &self.exclude_dirs {
            policy = policy.exclude_directory(dir.clone());
        }
        for file in &self.exclude_files {
            policy = policy.exclude_file(file.clone());
        }
        policy
    }

    /// Absolute location of the workspace index artifact
    pub fn index_path(&self, repo_root: &Path) -> PathBuf {
        if self.index_file.is_absolute() {
            self.index_file.clone()
        } else {
            repo_root.join(&self.index_file)
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub root: Option<PathBuf>,
    pub packages: Option<Vec<String>>,
    pub files: Option<Vec<PathBuf>>,
    pub with_dependencies: Option<bool>,
    pub output_file: Option<PathBuf>,
    pub max_file_size: Option<u64>,
    pub include_all: Option<bool>,
    pub exclude_dirs: Option<Vec<String>>,
    pub exclude_files: Option<Vec<String>>,
    pub write_index: Option<bool>,
    pub use_cached_index: Option<bool>,
    pub index_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub summary_format: Option<OutputFormat>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.root.is_some() {
            self.root = other.root;
        }
        if other.packages.is_some() {
            self.packages = other.packages;
        }
        if other.files.is_some() {
            self.files = other.files;
        }
        if other.with_dependencies.is_some() {
            self.with_dependencies = other.with_dependencies;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.max_file_size.is_some() {
            self.max_file_size = other.max_file_size;
        }
        if other.include_all.is_some() {
            self.include_all = other.include_all;
        }
        if other.exclude_dirs.is_some() {
            self.exclude_dirs = other.exclude_dirs;
        }
        if other.exclude_files.is_some() {
            self.exclude_files = other.exclude_files;
        }
        if other.write_index.is_some() {
            self.write_index = other.write_index;
        }
        if other.use_cached_index.is_some() {
            self.use_cached_index = other.use_cached_index;
        }
        if other.index_file.is_some() {
            self.index_file = other.index_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.summary_format.is_some() {
            self.summary_format = other.summary_format;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(root) = &self.root {
            settings.root = Some(root.clone());
        }
        if let Some(packages) = &self.packages {
            settings.packages = packages.clone();
        }
        if let Some(files) = &self.files {
            settings.files = files.clone();
        }
        if let Some(with_dependencies) = self.with_dependencies {
            settings.with_dependencies = with_dependencies;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(max_file_size) = self.max_file_size {
            settings.max_file_size = max_file_size;
        }
        if let Some(include_all) = self.include_all {
            settings.include_all = include_all;
        }
        if let Some(exclude_dirs) = &self.exclude_dirs {
            settings.exclude_dirs = exclude_dirs.clone();
        }
        if let Some(exclude_files) = &self.exclude_files {
            settings.exclude_files = exclude_files.clone();
        }
        if let Some(write_index) = self.write_index {
            settings.write_index = write_index;
        }
        if let Some(use_cached_index) = self.use_cached_index {
            settings.use_cached_index = use_cached_index;
        }
        if let Some(index_file) = &self.index_file {
            settings.index_file = index_file.clone();
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(summary_format) = &self.summary_format {
            settings.summary_format = summary_format.clone();
        }

        settings
    }
}
