//! Fixture helpers shared by the integration tests

use flattener::{
    core::flattener::{Flattener, RunReport},
    error::Result,
    models::config::Settings,
    output::ProgressReporter,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A repository directory plus a separate working directory for default outputs
pub struct Fixture {
    repo: TempDir,
    work: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            repo: TempDir::new().unwrap(),
            work: TempDir::new().unwrap(),
        };
        fs::create_dir_all(fixture.root().join(".git")).unwrap();
        fixture
    }

    /// Canonical repository root, as the flattener reports it
    pub fn root(&self) -> PathBuf {
        self.repo.path().canonicalize().unwrap()
    }

    pub fn work_dir(&self) -> PathBuf {
        self.work.path().canonicalize().unwrap()
    }

    pub fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_json(&self, relative: &str, value: serde_json::Value) -> PathBuf {
        self.write(relative, serde_json::to_string_pretty(&value).unwrap())
    }

    /// Settings rooted at this fixture with progress output disabled
    pub fn settings(&self) -> Settings {
        Settings {
            root: Some(self.root()),
            show_progress: false,
            use_colors: false,
            ..Settings::default()
        }
    }

    /// Where a run without an explicit output writes its artifact
    pub fn default_output(&self) -> PathBuf {
        let name = self.root().file_name().unwrap().to_string_lossy().into_owned();
        self.work_dir().join(format!("{}_flattened.txt", name))
    }

    pub fn try_run(&self, settings: &Settings) -> Result<RunReport> {
        let progress = ProgressReporter::hidden();
        Flattener::new(settings, self.work_dir(), &progress).run()
    }

    pub fn run(&self, settings: &Settings) -> RunReport {
        self.try_run(settings).unwrap()
    }
}

/// Header line the traversal engine writes before each file
pub fn header(relative: &str) -> String {
    format!("File: {} (", relative)
}

/// Relative paths of every record in an artifact, in output order
pub fn record_paths(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("File: "))
        .map(|rest| rest.rsplit_once(" (").map(|(path, _)| path).unwrap_or(rest).to_string())
        .collect()
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
