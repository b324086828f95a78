//! Content sniffing and path formatting helpers

use std::path::{Component, Path};

/// Number of leading bytes inspected when sniffing for binary content
pub const SNIFF_LEN: usize = 8192;

/// Check if content appears to be binary
///
/// Only the first 8 KiB are inspected. Content is binary when that prefix
/// holds a NUL byte, when more than a tenth of it is control bytes other than
/// tab, line feed, form feed and carriage return, or when more than a tenth of
/// it decodes to replacement characters. Empty content is text.
pub fn is_binary(content: &[u8]) -> bool {
    if content.is_empty() {
        return false;
    }

    let sample = &content[..content.len().min(SNIFF_LEN)];
    if sample.contains(&0) {
        return true;
    }

    let control = sample.iter().filter(|b| is_control_byte(**b)).count();
    if control * 10 > sample.len() {
        return true;
    }

    let text = String::from_utf8_lossy(sample);
    let replaced = text.chars().filter(|c| *c == '\u{FFFD}').count();
    replaced * 10 > text.chars().count()
}

fn is_control_byte(byte: u8) -> bool {
    match byte {
        b'\t' | b'\n' | b'\r' | 0x0c => false,
        0x00..=0x1f | 0x7f => true,
        _ => false,
    }
}

/// Format a size in bytes to a human-readable string
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", size as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Join the normal components of a path with forward slashes
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
