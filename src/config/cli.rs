//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, SummaryFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub packages: Option<Vec<String>>,
    pub files: Option<Vec<PathBuf>>,
    pub with_deps: bool,
    pub output: Option<PathBuf>,
    pub max_size: Option<u64>,
    pub include_all: bool,
    pub exclude_dirs: Option<Vec<String>>,
    pub exclude_files: Option<Vec<String>>,
    pub cached_index: bool,
    pub no_index: bool,
    pub index_file: Option<PathBuf>,
    pub summary_format: Option<OutputFormat>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        CliArgs {
            root: args.root.clone(),
            packages: non_empty(&args.packages),
            files: non_empty(&args.files),
            with_deps: args.with_deps,
            output: args.output.clone(),
            max_size: args.max_size,
            include_all: args.include_all,
            exclude_dirs: non_empty(&args.exclude_dirs),
            exclude_files: non_empty(&args.exclude_files),
            cached_index: args.cached_index,
            no_index: args.no_index,
            index_file: args.index_file.clone(),
            summary_format: args.summary.map(|format| match format {
                SummaryFormat::Text => OutputFormat::Text,
                SummaryFormat::Json => OutputFormat::Json,
            }),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30, // Highest priority
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(root) = &self.args.root {
            settings.root = Some(root.clone());
        }

        if let Some(packages) = &self.args.packages {
            settings.packages = Some(packages.clone());
        }

        if let Some(files) = &self.args.files {
            settings.files = Some(files.clone());
        }

        if let Some(output) = &self.args.output {
            settings.output_file = Some(output.clone());
        }

        if let Some(max_size) = self.args.max_size {
            settings.max_file_size = Some(max_size);
        }

        // Exclusion lists replace, rather than extend, lower layers
        if let Some(exclude_dirs) = &self.args.exclude_dirs {
            settings.exclude_dirs = Some(exclude_dirs.clone());
        }

        if let Some(exclude_files) = &self.args.exclude_files {
            settings.exclude_files = Some(exclude_files.clone());
        }

        if let Some(index_file) = &self.args.index_file {
            settings.index_file = Some(index_file.clone());
        }

        if let Some(format) = &self.args.summary_format {
            settings.summary_format = Some(format.clone());
        }

        // Boolean flags only ever switch a default
        if self.args.with_deps {
            settings.with_dependencies = Some(true);
        }

        if self.args.include_all {
            settings.include_all = Some(true);
        }

        if self.args.cached_index {
            settings.use_cached_index = Some(true);
        }

        if self.args.no_index {
            settings.write_index = Some(false);
        }

        if self.args.quiet {
            settings.quiet = Some(true);
        }

        if self.args.verbose {
            settings.verbose = Some(true);
        }

        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        // CLI args are always available
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
