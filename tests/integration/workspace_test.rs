//! Package selection, workspace manifests and the index cache

use super::support::{read, record_paths, Fixture};
use serde_json::json;

fn create_monorepo(fixture: &Fixture) {
    fixture.write_json(
        "package.json",
        json!({ "name": "monorepo", "private": true, "workspaces": ["packages/*"] }),
    );
    fixture.write_json(
        "packages/core/package.json",
        json!({ "name": "@acme/core", "description": "Core helpers", "exports": "./src/index.js" }),
    );
    fixture.write("packages/core/src/index.js", "export function helper() {}\n");
    fixture.write_json("packages/ui/package.json", json!({ "name": "@acme/ui" }));
    fixture.write("packages/ui/src/button.js", "export const Button = 1;\n");
    fixture.write_json("tools/script/package.json", json!({ "name": "outside-workspace" }));
}

#[test]
fn test_named_packages_are_flattened_in_request_order() {
    let fixture = Fixture::new();
    create_monorepo(&fixture);

    let mut settings = fixture.settings();
    settings.packages = vec!["@acme/ui".to_string(), "@acme/core".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(report.package_count, 2);
    assert_eq!(
        report.target_roots,
        vec![
            fixture.root().join("packages/ui"),
            fixture.root().join("packages/core"),
        ]
    );
    assert!(report.missing_packages.is_empty());

    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(
        record_paths(&output),
        vec![
            "packages/ui/package.json",
            "packages/ui/src/button.js",
            "packages/core/package.json",
            "packages/core/src/index.js",
        ]
    );
}

#[test]
fn test_unknown_package_is_reported_not_fatal() {
    let fixture = Fixture::new();
    create_monorepo(&fixture);

    let mut settings = fixture.settings();
    settings.packages = vec!["@acme/core".to_string(), "@acme/missing".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(report.target_roots, vec![fixture.root().join("packages/core")]);
    assert_eq!(report.missing_packages, vec!["@acme/missing".to_string()]);
    assert_eq!(report.processed_file_count, 2);
}

#[test]
fn test_manifest_matching_nothing_yields_no_targets() {
    let fixture = Fixture::new();
    fixture.write("pnpm-workspace.yaml", "packages:\n  - 'apps/*'\n");
    fixture.write_json("libs/a/package.json", json!({ "name": "a" }));

    let mut settings = fixture.settings();
    settings.packages = vec!["a".to_string(), "b".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(report.package_count, 0);
    assert!(report.target_roots.is_empty());
    assert_eq!(report.missing_packages, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(report.processed_file_count, 0);
    assert_eq!(report.artifact, None);
    // Nothing discovered, nothing cached
    assert_eq!(report.index_file, None);
    assert!(!fixture.root().join(".workspace-index.json").exists());
}

#[test]
fn test_fallback_scan_without_manifest() {
    let fixture = Fixture::new();
    fixture.write_json("a/package.json", json!({ "name": "a" }));
    fixture.write_json("nested/deep/b/package.json", json!({ "name": "b" }));
    fixture.write_json("node_modules/c/package.json", json!({ "name": "c" }));

    let mut settings = fixture.settings();
    settings.packages = vec!["b".to_string(), "c".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(report.package_count, 2);
    assert_eq!(report.target_roots, vec![fixture.root().join("nested/deep/b")]);
    assert_eq!(report.missing_packages, vec!["c".to_string()]);
}

#[test]
fn test_index_is_written_after_discovery() {
    let fixture = Fixture::new();
    create_monorepo(&fixture);

    let report = fixture.run(&fixture.settings());
    let index_path = fixture.root().join(".workspace-index.json");

    assert_eq!(report.index_file, Some(index_path.clone()));
    let index: serde_json::Value = serde_json::from_str(&read(&index_path)).unwrap();
    let entries = index.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "@acme/core");
    assert_eq!(entries[0]["path"], "packages/core");
    assert_eq!(entries[0]["description"], "Core helpers");
    assert_eq!(entries[0]["exports"]["."], "./src/index.js");
    assert_eq!(entries[1]["name"], "@acme/ui");

    // The index is a dotfile and never flattened itself
    let output = read(report.artifact.as_ref().unwrap());
    assert!(!output.contains("File: .workspace-index.json"));
}

#[test]
fn test_index_can_be_disabled() {
    let fixture = Fixture::new();
    create_monorepo(&fixture);

    let mut settings = fixture.settings();
    settings.write_index = false;
    let report = fixture.run(&settings);

    assert_eq!(report.index_file, None);
    assert!(!fixture.root().join(".workspace-index.json").exists());
}

#[test]
fn test_cached_index_replaces_discovery() {
    let fixture = Fixture::new();
    create_monorepo(&fixture);
    fixture.run(&fixture.settings());

    // A package added after the index was written is invisible to cached runs
    fixture.write_json("packages/late/package.json", json!({ "name": "@acme/late" }));

    let mut settings = fixture.settings();
    settings.use_cached_index = true;
    settings.packages = vec!["@acme/core".to_string(), "@acme/late".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(report.package_count, 2);
    assert_eq!(report.target_roots, vec![fixture.root().join("packages/core")]);
    assert_eq!(report.missing_packages, vec!["@acme/late".to_string()]);
}

#[test]
fn test_missing_cached_index_degrades_to_empty_registry() {
    let fixture = Fixture::new();
    create_monorepo(&fixture);

    let mut settings = fixture.settings();
    settings.use_cached_index = true;
    settings.packages = vec!["@acme/core".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(report.package_count, 0);
    assert!(report.target_roots.is_empty());
    assert_eq!(report.missing_packages, vec!["@acme/core".to_string()]);
}

#[test]
fn test_failed_target_does_not_stop_later_targets() {
    let fixture = Fixture::new();
    fixture.write_json("libs/a/package.json", json!({ "name": "a" }));
    fixture.write("libs/a/index.js", "export const a = 1;\n");
    // The index still lists a package whose directory has since been removed
    fixture.write_json(
        ".workspace-index.json",
        json!([
            { "name": "gone", "path": "gone" },
            { "name": "a", "path": "libs/a" }
        ]),
    );

    let mut settings = fixture.settings();
    settings.use_cached_index = true;
    settings.packages = vec!["gone".to_string(), "a".to_string()];
    let report = fixture.run(&settings);

    assert_eq!(
        report.target_roots,
        vec![fixture.root().join("gone"), fixture.root().join("libs/a")]
    );
    assert_eq!(report.failed_targets, vec![fixture.root().join("gone")]);
    assert!(report.missing_packages.is_empty());
    assert_eq!(report.processed_file_count, 2);
    assert_eq!(report.skipped_file_count, 0);

    let output = read(report.artifact.as_ref().unwrap());
    assert_eq!(record_paths(&output), vec!["libs/a/index.js", "libs/a/package.json"]);
}
