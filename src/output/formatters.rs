//! Output formatting functionality
//!
//! Renders the run summary as colored text or JSON.

use crate::core::flattener::RunReport;
use crate::error::Result;
use crate::utils::fs::format_size;
use ansi_term::Colour::{Blue, Green, Red, Yellow};
use ansi_term::Style;

fn paint_count(count: usize, colour: ansi_term::Colour, use_colors: bool) -> String {
    if use_colors && count > 0 {
        colour.paint(count.to_string()).to_string()
    } else {
        count.to_string()
    }
}

fn dimmed(text: String, use_colors: bool) -> String {
    if use_colors {
        Style::new().dimmed().paint(text).to_string()
    } else {
        text
    }
}

/// One-line summary for quiet mode
pub fn format_summary_line(report: &RunReport) -> String {
    format!(
        "Processed: {}, Skipped: {}, Output: {}\n",
        report.processed_file_count,
        report.skipped_file_count,
        report
            .artifact
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    )
}

/// Format the run summary as text
pub fn format_summary_text(report: &RunReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n", Blue.bold().paint("Flatten Summary")));
    } else {
        output.push_str("Flatten Summary\n");
    }
    output.push_str("==============\n\n");

    output.push_str(&format!(
        "Repository: {}\n",
        dimmed(report.repo_root.display().to_string(), use_colors)
    ));
    output.push_str(&format!("Workspace packages: {}\n", report.package_count));
    output.push_str(&format!(
        "Target roots: {}\n",
        report.target_roots.len().saturating_sub(report.failed_targets.len())
    ));
    output.push_str(&format!(
        "Files processed: {}\n",
        paint_count(report.processed_file_count, Green, use_colors)
    ));
    output.push_str(&format!(
        "Files skipped: {}\n",
        paint_count(report.skipped_file_count, Yellow, use_colors)
    ));
    output.push_str(&format!(
        "Output size: {}\n",
        format_size(report.output_bytes as u64)
    ));

    match &report.artifact {
        Some(path) => {
            output.push_str(&format!("Written to: {}\n", path.display()));
        }
        None => {
            let note = "Nothing selected, no output written";
            if use_colors {
                output.push_str(&format!("{}\n", Yellow.paint(note)));
            } else {
                output.push_str(&format!("{}\n", note));
            }
        }
    }

    if !report.missing_packages.is_empty() {
        let header = format!("Packages not found: {}", report.missing_packages.len());
        if use_colors {
            output.push_str(&format!("\n{}\n", Yellow.bold().paint(header)));
        } else {
            output.push_str(&format!("\n{}\n", header));
        }
        for name in &report.missing_packages {
            output.push_str(&format!("  - {}\n", name));
        }
    }

    if !report.failed_targets.is_empty() {
        let header = format!("Failed targets: {}", report.failed_targets.len());
        if use_colors {
            output.push_str(&format!("\n{}\n", Red.bold().paint(header)));
        } else {
            output.push_str(&format!("\n{}\n", header));
        }
        for target in &report.failed_targets {
            output.push_str(&format!("  - {}\n", target.display()));
        }
    }

    if verbose {
        output.push_str("\nTargets:\n");
        for target in &report.target_roots {
            let shown = target.strip_prefix(&report.repo_root).unwrap_or(target);
            let shown = if shown.as_os_str().is_empty() {
                ".".to_string()
            } else {
                shown.display().to_string()
            };
            output.push_str(&format!("  {}\n", dimmed(shown, use_colors)));
        }
        if let Some(index) = &report.index_file {
            output.push_str(&format!("\nWorkspace index: {}\n", index.display()));
        }
    }

    output
}

/// Format the run summary as JSON
pub fn format_summary_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)? + "\n")
}
