//! Command implementations

use std::io::Write;
use std::path::{Path, PathBuf};

use super::Args;
use crate::config::{load_config, CliArgs, FileConfig, DEFAULT_CONFIG_FILE};
use crate::core::flattener::{Flattener, RunReport};
use crate::error::{FlattenError, Result, ResultExt};
use crate::models::config::Settings;
use crate::output::{create_formatter, ProgressReporter, STDOUT_PATH};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Flatten the selected repository, packages or files
    Flatten(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        Command::Flatten(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Flatten(args) => {
                let settings = load_config(CliArgs::from(args))?;
                let working_dir = std::env::current_dir()
                    .with_context(|| "Cannot determine the working directory")?;

                let report = run_flatten(&settings, &working_dir)?;
                print_summary(&settings, &report)
            }
            Command::Init => init_config(Path::new(DEFAULT_CONFIG_FILE)),
        }
    }

    /// Run the command and map failures to an exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("Error: {}", err.user_message());
                if let Some(hint) = err.hint() {
                    eprintln!("Hint: {}", hint);
                }

                // Anything reaching this point stopped the run
                if err.is_critical() {
                    2
                } else {
                    1
                }
            }
        }
    }
}

/// Run one flatten with the given settings
pub fn run_flatten(settings: &Settings, working_dir: &Path) -> Result<RunReport> {
    let progress = ProgressReporter::new(settings.quiet, settings.show_progress);
    Flattener::new(settings, working_dir, &progress).run()
}

/// Print the run summary, keeping stdout clean when the artifact goes there
fn print_summary(settings: &Settings, report: &RunReport) -> Result<()> {
    let formatter = create_formatter(
        &settings.summary_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    );
    let summary = formatter.format(report)?;

    let artifact_on_stdout = report.artifact.as_deref() == Some(Path::new(STDOUT_PATH));
    if artifact_on_stdout {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(summary.as_bytes())
            .map_err(FlattenError::io_error)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(summary.as_bytes())
            .map_err(|e| FlattenError::StdoutWrite {
                source: e,
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            })?;
    }

    Ok(())
}

/// Write a default configuration file unless one already exists
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Configuration file already exists at: {}", path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    FileConfig::with_path(PathBuf::from(path)).create_default()?;

    println!("Created default configuration file at: {}", path.display());
    println!("\nEvery setting is commented out; uncomment the ones you want to change:");
    println!("  - root: repository root");
    println!("  - packages / files / with_dependencies: what to flatten");
    println!("  - max_file_size, include_all, exclude_dirs, exclude_files: filtering");
    println!("  - write_index, use_cached_index, index_file: workspace index handling");

    Ok(())
}
