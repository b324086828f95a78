//! Output formatting and writing functionality

mod formatters;
pub mod progress;
pub mod writers;

pub use self::progress::ProgressReporter;
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter, STDOUT_PATH};

use crate::core::flattener::RunReport;
use crate::error::Result;
use crate::models::config::OutputFormat;

/// Trait for different summary formatters
pub trait Formatter {
    /// Format a run report into a string
    fn format(&self, report: &RunReport) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        if self.quiet {
            return Ok(formatters::format_summary_line(report));
        }
        Ok(formatters::format_summary_text(
            report,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        formatters::format_summary_json(report)
    }
}

/// Create a formatter based on the summary format
pub fn create_formatter(
    format: &OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
