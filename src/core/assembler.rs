//! Output assembly across target roots

use crate::error::Result;
use crate::models::selection::SelectionResult;
use crate::output::writers::create_writer;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Concatenated output of every target root of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledOutput {
    pub content: String,
    pub processed_file_count: usize,
    pub skipped_file_count: usize,
    /// Target roots that contributed to the totals
    pub target_count: usize,
}

impl AssembledOutput {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Accumulates selection results in call order
#[derive(Debug, Default)]
pub struct OutputAssembler {
    assembled: AssembledOutput,
}

impl OutputAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one target root's output and add its counts
    pub fn absorb(&mut self, result: SelectionResult) {
        self.assembled.content.push_str(&result.output);
        self.assembled.processed_file_count += result.processed_file_count;
        self.assembled.skipped_file_count += result.skipped_file_count;
        self.assembled.target_count += 1;
    }

    pub fn finish(self) -> AssembledOutput {
        self.assembled
    }
}

/// Write the artifact.
///
/// An explicit path is always written, even with empty content; the default
/// path only when there is something to write. Returns the destination used.
pub fn write_artifact(
    output: &AssembledOutput,
    explicit_path: Option<&Path>,
    default_path: &Path,
) -> Result<Option<PathBuf>> {
    let destination = match explicit_path {
        Some(path) => path,
        None if output.is_empty() => {
            debug!("Nothing selected, not writing {}", default_path.display());
            return Ok(None);
        }
        None => default_path,
    };

    create_writer(destination).write(&output.content)?;
    info!(
        "Wrote {} bytes to {}",
        output.content.len(),
        destination.display()
    );
    Ok(Some(destination.to_path_buf()))
}
