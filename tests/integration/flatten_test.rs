//! Whole-repository flattening through the public Flattener API

use super::support::{header, read, record_paths, Fixture};
use std::fs;

fn create_project(fixture: &Fixture) {
    fixture.write("README.md", "# Demo\n");
    fixture.write("src/b.js", "export const b = 2;\n");
    fixture.write("src/a.js", "export const a = 1;\n");
    fixture.write("src/nested/c.ts", "export type C = string;");
    fixture.write("node_modules/dep/index.js", "module.exports = {};\n");
    fixture.write(".git/config", "[core]\n");
    fixture.write(".env", "SECRET=1\n");
    fixture.write("yarn.lock", "# lockfile\n");
}

#[test]
fn test_repository_mode_writes_default_artifact() {
    let fixture = Fixture::new();
    create_project(&fixture);

    let report = fixture.run(&fixture.settings());

    assert_eq!(report.repo_root, fixture.root());
    assert_eq!(report.target_roots, vec![fixture.root()]);
    assert_eq!(report.artifact, Some(fixture.default_output()));
    assert_eq!(report.processed_file_count, 4);
    // .env and yarn.lock are rejected by name; pruned directories are not counted
    assert_eq!(report.skipped_file_count, 2);

    let output = read(&fixture.default_output());
    assert_eq!(
        record_paths(&output),
        vec!["README.md", "src/a.js", "src/b.js", "src/nested/c.ts"]
    );
    assert!(!output.contains("SECRET"));
    assert!(!output.contains("module.exports"));
    assert!(!output.contains("[core]"));
    assert_eq!(report.output_bytes, output.len());
}

#[test]
fn test_record_layout() {
    let fixture = Fixture::new();
    fixture.write("only.txt", "no trailing newline");

    let report = fixture.run(&fixture.settings());
    let output = read(report.artifact.as_ref().unwrap());

    let separator = "=".repeat(80);
    let expected = format!(
        "{sep}\nFile: only.txt (19 B)\n{sep}\nno trailing newline\n\n",
        sep = separator
    );
    assert_eq!(output, expected);
}

#[test]
fn test_binary_file_is_skipped() {
    let fixture = Fixture::new();
    fixture.write("logo.png", [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d]);
    fixture.write("main.js", "console.log('hi');\n");

    let report = fixture.run(&fixture.settings());

    assert_eq!(report.processed_file_count, 1);
    assert_eq!(report.skipped_file_count, 1);
    let output = read(report.artifact.as_ref().unwrap());
    assert!(!output.contains(&header("logo.png")));
    assert!(!output.contains("PNG"));
    assert!(!output.contains('\0'));
}

#[test]
fn test_control_byte_file_without_nul_is_skipped() {
    let fixture = Fixture::new();
    let control: Vec<u8> = (0x01..0x20).cycle().take(512).collect();
    fixture.write("blob.dat", control);
    fixture.write("main.js", "console.log('hi');\n");

    let report = fixture.run(&fixture.settings());

    assert_eq!(report.processed_file_count, 1);
    assert_eq!(report.skipped_file_count, 1);
    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec!["main.js"]);
    assert!(!output.bytes().any(|b| b < 0x20 && !b"\t\n\r".contains(&b)));
}

#[test]
fn test_size_threshold_skips_large_files() {
    let fixture = Fixture::new();
    fixture.write("small.txt", "tiny\n");
    fixture.write("large.txt", "x".repeat(64));

    let mut settings = fixture.settings();
    settings.max_file_size = 32;
    let report = fixture.run(&settings);

    assert_eq!(report.processed_file_count, 1);
    assert_eq!(report.skipped_file_count, 1);
    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec!["small.txt"]);
}

#[test]
fn test_extra_exclusions_are_honored() {
    let fixture = Fixture::new();
    fixture.write("dist/bundle.js", "bundle\n");
    fixture.write("src/index.js", "index\n");
    fixture.write("CHANGELOG.md", "changes\n");

    let mut settings = fixture.settings();
    settings.exclude_dirs = vec!["dist".to_string()];
    settings.exclude_files = vec!["CHANGELOG.md".to_string()];
    let report = fixture.run(&settings);

    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec!["src/index.js"]);
    assert_eq!(report.skipped_file_count, 1);
}

#[test]
fn test_include_all_disables_filters() {
    let fixture = Fixture::new();
    fixture.write("yarn.lock", "# lockfile\n");
    fixture.write("data.bin", [0u8, 1, 2, 3]);
    fixture.write("big.txt", "y".repeat(64));

    let mut settings = fixture.settings();
    settings.include_all = true;
    settings.max_file_size = 8;
    settings.output_file = Some(fixture.work_dir().join("all.txt"));
    let report = fixture.run(&settings);

    let output = read(&fixture.work_dir().join("all.txt"));
    let paths = record_paths(&output);
    assert!(paths.contains(&"yarn.lock".to_string()));
    assert!(paths.contains(&"data.bin".to_string()));
    assert!(paths.contains(&"big.txt".to_string()));
    assert_eq!(report.skipped_file_count, 0);
}

#[test]
fn test_empty_repository_writes_nothing() {
    let fixture = Fixture::new();
    fixture.write("node_modules/dep/index.js", "module.exports = 1;\n");

    let report = fixture.run(&fixture.settings());

    assert_eq!(report.processed_file_count, 0);
    assert_eq!(report.skipped_file_count, 0);
    assert_eq!(report.output_bytes, 0);
    assert_eq!(report.artifact, None);
    assert!(!fixture.default_output().exists());
}

#[test]
fn test_explicit_output_is_written_even_when_empty() {
    let fixture = Fixture::new();
    let output_path = fixture.work_dir().join("context.txt");

    let mut settings = fixture.settings();
    settings.output_file = Some(output_path.clone());
    let report = fixture.run(&settings);

    assert_eq!(report.artifact, Some(output_path.clone()));
    assert_eq!(read(&output_path), "");
}

#[test]
fn test_output_inside_repository_is_not_flattened() {
    let fixture = Fixture::new();
    fixture.write("src/index.js", "export default 1;\n");
    let output_path = fixture.root().join("context.txt");

    let mut settings = fixture.settings();
    settings.output_file = Some(output_path.clone());
    fixture.run(&settings);
    let second = fixture.run(&settings);

    let output = read(&output_path);
    assert_eq!(record_paths(&output), vec!["src/index.js"]);
    assert_eq!(second.skipped_file_count, 1);
}

#[test]
fn test_output_name_does_not_hide_files_sharing_it() {
    let fixture = Fixture::new();
    fixture.write("src/index.js", "export default 1;\n");
    fixture.write("lib/index.js", "export default 2;\n");
    fs::create_dir_all(fixture.root().join("out")).unwrap();
    let output_path = fixture.root().join("out/index.js");

    let mut settings = fixture.settings();
    settings.output_file = Some(output_path.clone());
    fixture.run(&settings);
    let second = fixture.run(&settings);

    assert_eq!(second.processed_file_count, 2);
    assert_eq!(second.skipped_file_count, 1);
    let output = read(&output_path);
    assert_eq!(record_paths(&output), vec!["lib/index.js", "src/index.js"]);
}

#[test]
fn test_explicit_file_outside_repository_keeps_absolute_header() {
    let fixture = Fixture::new();
    let outside = fixture.work_dir().join("notes.txt");
    fs::write(&outside, "outside the repository\n").unwrap();

    let mut settings = fixture.settings();
    settings.files = vec![outside.clone()];
    settings.output_file = Some(fixture.work_dir().join("out.txt"));
    let report = fixture.run(&settings);

    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec![outside.display().to_string()]);
}

#[test]
fn test_runs_are_idempotent() {
    let fixture = Fixture::new();
    create_project(&fixture);
    let output_path = fixture.work_dir().join("out.txt");

    let mut settings = fixture.settings();
    settings.output_file = Some(output_path.clone());

    fixture.run(&settings);
    let first = fs::read(&output_path).unwrap();
    fixture.run(&settings);
    let second = fs::read(&output_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_root_is_fatal() {
    let fixture = Fixture::new();
    let mut settings = fixture.settings();
    settings.root = Some(fixture.root().join("absent"));

    let err = fixture.try_run(&settings).unwrap_err();
    assert!(matches!(err, flattener::FlattenError::InvalidPath { .. }));
    assert!(err.is_critical());
}

#[test]
fn test_root_discovered_from_working_directory() {
    let fixture = Fixture::new();
    fixture.write("src/index.js", "export {};\n");
    let nested = fixture.root().join("src");

    let mut settings = fixture.settings();
    settings.root = None;
    settings.output_file = Some(fixture.work_dir().join("out.txt"));

    let progress = flattener::output::ProgressReporter::hidden();
    let report = flattener::Flattener::new(&settings, &nested, &progress)
        .run()
        .unwrap();

    assert_eq!(report.repo_root, fixture.root());
    assert_eq!(report.processed_file_count, 1);
}
