//! Output writing functionality
//!
//! This module provides writers for different output destinations.

use crate::error::{FlattenError, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Destination name that selects standard output
pub const STDOUT_PATH: &str = "-";

/// Trait for output writers
pub trait OutputWriter {
    /// Write content to the output destination
    fn write(&self, content: &str) -> Result<()>;
}

/// Writer for stdout output
#[derive(Debug)]
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| FlattenError::StdoutWrite {
                source: e,
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            })
    }
}

/// Writer for file output
#[derive(Debug)]
pub struct FileWriter {
    path: std::path::PathBuf,
}

impl FileWriter {
    /// Create a new file writer
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        let mut file =
            File::create(&self.path).map_err(|e| FlattenError::output_write(&self.path, e))?;

        file.write_all(content.as_bytes())
            .map_err(|e| FlattenError::output_write(&self.path, e))
    }
}

/// Create an output writer for a destination path (`-` is stdout)
pub fn create_writer(destination: impl AsRef<Path>) -> Box<dyn OutputWriter> {
    let destination = destination.as_ref();
    if destination == Path::new(STDOUT_PATH) {
        Box::new(StdoutWriter)
    } else {
        Box::new(FileWriter::new(destination))
    }
}
