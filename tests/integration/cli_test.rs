//! Command-line arguments through configuration loading into a run

use super::support::{read, record_paths, Fixture};
use clap::Parser;
use flattener::{
    cli::{args::Args, commands::run_flatten, Command},
    config::{load_config_with_env_prefix, CliArgs},
    models::config::OutputFormat,
};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_cli_args_defaults() {
    let args = Args::parse_from(["flattener"]);

    assert_eq!(args.root, None);
    assert!(args.packages.is_empty());
    assert!(args.files.is_empty());
    assert!(!args.with_deps);
    assert_eq!(args.output, None);
    assert_eq!(args.max_size, None);
    assert!(!args.quiet);
    assert!(!args.verbose);
    assert!(!args.init);
}

#[test]
fn test_cli_config_option() {
    let args = Args::parse_from(["flattener", "--config", "custom-config.toml"]);
    assert_eq!(args.config, Some(PathBuf::from("custom-config.toml")));
}

#[test]
fn test_args_drive_a_full_run() {
    let fixture = Fixture::new();
    fixture.write("src/index.js", "export const answer = 42;\n");
    fixture.write("src/huge.js", "z".repeat(256));
    let output_path = fixture.work_dir().join("flat.txt");

    let args = Args::parse_from([
        "flattener".to_string(),
        "--root".to_string(),
        fixture.root().display().to_string(),
        "--output".to_string(),
        output_path.display().to_string(),
        "--max-size".to_string(),
        "100".to_string(),
        "--no-index".to_string(),
        "--no-progress".to_string(),
        "--summary".to_string(),
        "json".to_string(),
    ]);

    let settings = load_config_with_env_prefix(CliArgs::from(&args), "FLTEST_CLI_RUN").unwrap();
    assert_eq!(settings.max_file_size, 100);
    assert_eq!(settings.summary_format, OutputFormat::Json);
    assert!(!settings.write_index);

    let report = run_flatten(&settings, &fixture.work_dir()).unwrap();

    assert_eq!(report.processed_file_count, 1);
    assert_eq!(report.skipped_file_count, 1);
    assert_eq!(record_paths(&read(&output_path)), vec!["src/index.js"]);
}

#[test]
fn test_config_file_feeds_the_run() {
    let fixture = Fixture::new();
    fixture.write("keep/a.txt", "a\n");
    fixture.write("drop/b.txt", "b\n");

    let config_path = fixture.work_dir().join("flattener.toml");
    fs::write(&config_path, "exclude_dirs = [\"drop\"]\nwrite_index = false\n").unwrap();

    let args = Args::parse_from([
        "flattener".to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
        "--root".to_string(),
        fixture.root().display().to_string(),
        "--no-progress".to_string(),
    ]);

    let settings = load_config_with_env_prefix(CliArgs::from(&args), "FLTEST_CLI_FILE").unwrap();
    let report = run_flatten(&settings, &fixture.work_dir()).unwrap();

    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec!["keep/a.txt"]);
}

#[test]
fn test_command_exit_codes() {
    let fixture = Fixture::new();
    fixture.write("src/index.js", "export {};\n");
    let output_path = fixture.work_dir().join("out.txt");

    let ok = Args::parse_from([
        "flattener".to_string(),
        "--root".to_string(),
        fixture.root().display().to_string(),
        "--output".to_string(),
        output_path.display().to_string(),
        "--no-progress".to_string(),
        "--quiet".to_string(),
    ]);
    assert_eq!(Command::from_args(ok).run(), 0);
    assert!(output_path.exists());

    let missing_file = Args::parse_from([
        "flattener".to_string(),
        "--root".to_string(),
        fixture.root().display().to_string(),
        "--file".to_string(),
        fixture.root().join("absent.ts").display().to_string(),
        "--no-progress".to_string(),
    ]);
    assert_eq!(Command::from_args(missing_file).run(), 2);
}
