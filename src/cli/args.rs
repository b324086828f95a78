//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Flattener - concatenate a repository, workspace packages or files into one text file
#[derive(Parser, Debug, Default)]
#[command(name = "flattener")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Flatten a repository, workspace packages or selected files into a single text file")]
#[command(long_about = "Flattener walks a repository and concatenates every admitted text file into one \
output file, each file preceded by a header with its repository-relative path. It understands \
JavaScript and TypeScript workspaces: packages can be selected by name, and explicit files can be \
expanded with the workspace files that define the symbols they import.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Flatten the repository containing the current directory
    flattener

    # Flatten a specific repository
    flattener --root ./my-monorepo

    # Write to a specific file, or to stdout
    flattener --output context.txt
    flattener --output -

Workspace Packages:
    # Flatten two packages by name
    flattener -p @acme/core -p @acme/utils

Explicit Files:
    # Flatten a single file
    flattener -f packages/app/src/main.ts

    # Flatten a file together with the files defining its imports
    flattener -f packages/app/src/main.ts --with-deps

Filtering:
    # Skip files larger than 100 KiB
    flattener --max-size 102400

    # Exclude extra directories and files
    flattener --exclude-dir dist --exclude-file CHANGELOG.md

    # Disable every exclusion, size and binary filter
    flattener --include-all

Workspace Index:
    # Reuse the package locations written by an earlier run
    flattener --cached-index -f src/main.ts -d

    # Do not write the index file
    flattener --no-index

Configuration:
    # Use a specific configuration file
    flattener --config ./flattener.toml

    # Create a default configuration file
    flattener --init
")]
pub struct Args {
    /// Repository root
    #[arg(long, value_name = "DIR", help = "Repository root (defaults to the git top-level directory of the current directory)")]
    pub root: Option<PathBuf>,

    /// Workspace packages to flatten
    #[arg(short, long = "package", value_name = "NAME", help = "Workspace package to flatten by name (can be specified multiple times)")]
    pub packages: Vec<String>,

    /// Explicit files to flatten
    #[arg(short, long = "file", value_name = "PATH", help = "File to flatten (can be specified multiple times, takes precedence over --package)")]
    pub files: Vec<PathBuf>,

    /// Expand explicit files with their dependencies
    #[arg(short = 'd', long = "with-deps", help = "Also flatten the workspace files that define the symbols imported by --file targets")]
    pub with_deps: bool,

    /// Output file path
    #[arg(short, long, value_name = "FILE", help = "Output file (defaults to <repository-name>_flattened.txt, '-' writes to stdout)")]
    pub output: Option<PathBuf>,

    /// Size threshold in bytes
    #[arg(long, value_name = "BYTES", help = "Skip files larger than this many bytes (default: 512000)")]
    pub max_size: Option<u64>,

    /// Disable every filter
    #[arg(long, help = "Include every file: disables name, directory, size and binary filters")]
    pub include_all: bool,

    /// Additional excluded directory names
    #[arg(long = "exclude-dir", value_name = "NAME", help = "Directory name to exclude (can be specified multiple times)")]
    pub exclude_dirs: Vec<String>,

    /// Additional excluded file names
    #[arg(long = "exclude-file", value_name = "NAME", help = "File name to exclude (can be specified multiple times)")]
    pub exclude_files: Vec<String>,

    /// Read the workspace index instead of discovering packages
    #[arg(long, help = "Resolve packages from the workspace index written by an earlier run instead of re-discovering them")]
    pub cached_index: bool,

    /// Do not write the workspace index
    #[arg(long, help = "Do not write the workspace index file after discovery")]
    pub no_index: bool,

    /// Workspace index file name
    #[arg(long, value_name = "NAME", help = "Workspace index file, relative to the repository root (default: .workspace-index.json)")]
    pub index_file: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, value_name = "FORMAT", help = "Format of the run summary: 'text' for humans, 'json' for scripts")]
    pub summary: Option<SummaryFormat>,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Suppress non-essential output (prints a single summary line)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress and debug logging")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals that don't support ANSI colors or for piping output)")]
    pub no_colors: bool,

    /// Disable progress spinners
    #[arg(long, help = "Disable progress spinners (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .flattener.toml in current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.flattener.toml) in the current directory")]
    pub init: bool,
}

/// Summary format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Log filter used when `RUST_LOG` is unset
    ///
    /// Recovered errors log at warn, so they only show up with `--verbose`.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "flattener=debug"
        } else {
            "flattener=error"
        }
    }
}
