//! Explicit file selection with one-hop dependency expansion

use super::support::{read, record_paths, Fixture};
use flattener::FlattenError;
use serde_json::json;

fn create_packages(fixture: &Fixture) {
    fixture.write_json("pkg-a/package.json", json!({ "name": "pkg-a" }));
    fixture.write("pkg-a/index.js", "export function helper() { return 1; }\n");
    fixture.write(
        "pkg-a/consumer.js",
        "import { helper } from './index.js';\nexport const wrapped = () => helper();\n",
    );
    fixture.write("pkg-a/docs.md", "helper is documented here\n");
    fixture.write_json("pkg-b/package.json", json!({ "name": "pkg-b" }));
    fixture.write(
        "pkg-b/main.js",
        "import { helper } from 'pkg-a';\nimport path from 'node:path';\nhelper(path);\n",
    );
}

#[test]
fn test_dependencies_are_appended_after_their_origin() {
    let fixture = Fixture::new();
    create_packages(&fixture);
    let main = fixture.root().join("pkg-b/main.js");

    let mut settings = fixture.settings();
    settings.files = vec![main.clone()];
    settings.with_dependencies = true;
    let report = fixture.run(&settings);

    assert_eq!(
        report.target_roots,
        vec![main, fixture.root().join("pkg-a/index.js")]
    );
    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec!["pkg-b/main.js", "pkg-a/index.js"]);
    assert!(!output.contains("wrapped"));
}

#[test]
fn test_files_without_dependencies_stay_alone() {
    let fixture = Fixture::new();
    create_packages(&fixture);

    let mut settings = fixture.settings();
    settings.files = vec!["pkg-b/main.js".into()];
    let progress = flattener::output::ProgressReporter::hidden();
    // Relative paths resolve against the working directory
    let report = flattener::Flattener::new(&settings, fixture.root(), &progress)
        .run()
        .unwrap();

    assert_eq!(report.target_roots, vec![fixture.root().join("pkg-b/main.js")]);
    assert_eq!(report.processed_file_count, 1);
}

#[test]
fn test_only_exporting_candidates_are_kept() {
    let fixture = Fixture::new();
    create_packages(&fixture);
    fixture.write("pkg-a/lib/other.ts", "// calls helper but exports something else\nexport const other = 1;\n");
    fixture.write("pkg-a/lib/alias.ts", "const impl = 1;\nexport { impl as helper };\n");

    let mut settings = fixture.settings();
    settings.files = vec![fixture.root().join("pkg-b/main.js")];
    settings.with_dependencies = true;
    let report = fixture.run(&settings);

    assert_eq!(
        report.target_roots,
        vec![
            fixture.root().join("pkg-b/main.js"),
            fixture.root().join("pkg-a/index.js"),
            fixture.root().join("pkg-a/lib/alias.ts"),
        ]
    );
}

#[test]
fn test_shared_dependencies_are_listed_once() {
    let fixture = Fixture::new();
    create_packages(&fixture);
    fixture.write("pkg-b/second.js", "const { helper } = require('pkg-a');\nimport { helper as h } from 'pkg-a';\n");

    let mut settings = fixture.settings();
    settings.files = vec![
        fixture.root().join("pkg-b/main.js"),
        fixture.root().join("pkg-b/second.js"),
    ];
    settings.with_dependencies = true;
    let report = fixture.run(&settings);

    assert_eq!(
        report.target_roots,
        vec![
            fixture.root().join("pkg-b/main.js"),
            fixture.root().join("pkg-a/index.js"),
            fixture.root().join("pkg-b/second.js"),
        ]
    );
    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output).len(), 3);
}

#[test]
fn test_unparseable_origin_contributes_only_itself() {
    let fixture = Fixture::new();
    create_packages(&fixture);
    let broken = fixture.write("pkg-b/broken.js", "import { helper from 'pkg-a';\n");

    let mut settings = fixture.settings();
    settings.files = vec![broken.clone()];
    settings.with_dependencies = true;
    let report = fixture.run(&settings);

    assert_eq!(report.target_roots, vec![broken]);
    assert_eq!(report.processed_file_count, 1);
}

#[test]
fn test_non_source_origin_is_not_resolved() {
    let fixture = Fixture::new();
    create_packages(&fixture);
    let notes = fixture.write("pkg-b/NOTES.md", "import { helper } from 'pkg-a';\n");

    let mut settings = fixture.settings();
    settings.files = vec![notes.clone()];
    settings.with_dependencies = true;
    let report = fixture.run(&settings);

    assert_eq!(report.target_roots, vec![notes]);
}

#[test]
fn test_missing_explicit_file_is_fatal() {
    let fixture = Fixture::new();
    create_packages(&fixture);

    let mut settings = fixture.settings();
    settings.files = vec![fixture.root().join("pkg-b/absent.js")];
    settings.with_dependencies = true;

    let err = fixture.try_run(&settings).unwrap_err();
    assert!(matches!(err, FlattenError::InvalidPath { .. }));
    assert!(!fixture.default_output().exists());
}

#[test]
fn test_cached_index_resolves_like_discovery() {
    let fixture = Fixture::new();
    create_packages(&fixture);

    let mut settings = fixture.settings();
    settings.files = vec![fixture.root().join("pkg-b/main.js")];
    settings.with_dependencies = true;
    let discovered = fixture.run(&settings);

    settings.use_cached_index = true;
    let cached = fixture.run(&settings);

    assert_eq!(discovered.target_roots, cached.target_roots);
    assert_eq!(discovered.output_bytes, cached.output_bytes);
}
