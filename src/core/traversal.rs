//! File selection and traversal engine
//!
//! Walks one target root depth-first in file-name order, applies the exclusion
//! policy and emits a delimited text record for every admitted file.

use crate::error::{FlattenError, Result};
use crate::models::selection::{SelectionPolicy, SelectionResult, TraversalEntry};
use crate::utils::fs::{format_size, is_binary};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Width of the separator lines around each record header
pub const SEPARATOR_WIDTH: usize = 80;

/// Why a file was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ExcludedPath,
    ExcludedName,
    TooLarge,
    Binary,
    Unreadable,
}

/// Outcome of the single-file admission rule
#[derive(Debug)]
enum Admission {
    Admitted(String),
    Skipped(SkipReason),
}

/// Traversal engine bound to one selection policy
pub struct Traversal<'p> {
    policy: &'p SelectionPolicy,
}

impl<'p> Traversal<'p> {
    pub fn new(policy: &'p SelectionPolicy) -> Self {
        Self { policy }
    }

    /// Select every admissible file under `target`
    pub fn select(&self, target: &Path) -> Result<SelectionResult> {
        let metadata = match fs::metadata(target) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(FlattenError::invalid_path(target));
            }
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                return Err(FlattenError::permission_denied(target));
            }
            Err(err) => return Err(FlattenError::io_error(err)),
        };

        let mut result = SelectionResult::new();
        if metadata.is_file() {
            let entry = TraversalEntry {
                absolute_path: target.to_path_buf(),
                relative_path: self.policy.relative_path(target),
                size_in_bytes: metadata.len(),
                is_directory: false,
            };
            self.visit_file(&entry, &mut result);
        } else if metadata.is_dir() {
            self.walk_directory(target, &mut result)?;
        } else {
            return Err(FlattenError::not_file_or_directory(target));
        }

        debug!(
            "Selected {} file(s), skipped {} under {}",
            result.processed_file_count,
            result.skipped_file_count,
            target.display()
        );
        Ok(result)
    }

    fn walk_directory(&self, root: &Path, result: &mut SelectionResult) -> Result<()> {
        let policy = self.policy;
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let prune = entry.depth() > 0
                    && entry.file_type().is_dir()
                    && policy.prunes_directory(&entry.file_name().to_string_lossy());
                if prune {
                    debug!("Pruned directory {}", entry.path().display());
                }
                !prune
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(FlattenError::directory_traversal_error(root, err.to_string()));
                }
                Err(err) => {
                    debug!("Pruned unreadable entry: {}", err);
                    continue;
                }
            };

            // Sockets, FIFOs and symlinks are neither visited nor counted
            if !entry.file_type().is_file() {
                continue;
            }

            let size_in_bytes = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    debug!("Skipped {}: {}", entry.path().display(), err);
                    result.skipped_file_count += 1;
                    continue;
                }
            };

            let traversal_entry = TraversalEntry {
                relative_path: self.policy.relative_path(entry.path()),
                absolute_path: entry.into_path(),
                size_in_bytes,
                is_directory: false,
            };
            self.visit_file(&traversal_entry, result);
        }

        Ok(())
    }

    fn visit_file(&self, entry: &TraversalEntry, result: &mut SelectionResult) {
        match self.admit(entry) {
            Admission::Admitted(content) => {
                write_record(&mut result.output, entry, &content);
                result.processed_file_count += 1;
            }
            Admission::Skipped(reason) => {
                debug!("Skipped {} ({:?})", entry.relative_path, reason);
                result.skipped_file_count += 1;
            }
        }
    }

    /// Single-file admission rule; on success yields the file's text
    fn admit(&self, entry: &TraversalEntry) -> Admission {
        if self.policy.rejects_path(&entry.absolute_path) {
            return Admission::Skipped(SkipReason::ExcludedPath);
        }

        let name = entry
            .absolute_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.policy.rejects_file_name(&name) {
            return Admission::Skipped(SkipReason::ExcludedName);
        }
        if self.policy.rejects_size(entry.size_in_bytes) {
            return Admission::Skipped(SkipReason::TooLarge);
        }

        let bytes = match read_file(&entry.absolute_path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("{}", FlattenError::file_read(&entry.absolute_path, err).user_message());
                return Admission::Skipped(SkipReason::Unreadable);
            }
        };

        if !self.policy.include_all && is_binary(&bytes) {
            return Admission::Skipped(SkipReason::Binary);
        }

        Admission::Admitted(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Append one delimited record to `output`
pub fn write_record(output: &mut String, entry: &TraversalEntry, content: &str) {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    output.push_str(&separator);
    output.push('\n');
    output.push_str(&format!(
        "File: {} ({})\n",
        entry.relative_path,
        format_size(entry.size_in_bytes)
    ));
    output.push_str(&separator);
    output.push('\n');
    output.push_str(content);
    if !content.ends_with('\n') {
        output.push('\n');
    }
    output.push('\n');
}
