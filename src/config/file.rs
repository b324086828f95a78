//! Configuration file handling

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{FlattenError, Result};
use crate::models::config::{OutputFormat, PartialSettings};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".flattener.toml";

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "flattener";

/// Default environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "FLATTENER";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 10, // Lowest priority, overridden by environment and CLI
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 10,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(FlattenError::ConfigNotFound {
                path: self.path.clone(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

/// Variable suffixes understood by [`EnvConfig`]
const ENV_KEYS: &[&str] = &[
    "ROOT",
    "OUTPUT",
    "MAX_SIZE",
    "INCLUDE_ALL",
    "EXCLUDE_DIRS",
    "EXCLUDE_FILES",
    "INDEX_FILE",
    "CACHED_INDEX",
    "NO_COLOR",
    "SUMMARY_FORMAT",
];

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 20, // Overrides config files, overridden by CLI
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.var(key)
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        settings.root = self.var("ROOT").map(PathBuf::from);
        settings.output_file = self.var("OUTPUT").map(PathBuf::from);
        settings.index_file = self.var("INDEX_FILE").map(PathBuf::from);
        settings.exclude_dirs = self.list("EXCLUDE_DIRS");
        settings.exclude_files = self.list("EXCLUDE_FILES");
        settings.include_all = self.flag("INCLUDE_ALL");
        settings.use_cached_index = self.flag("CACHED_INDEX");

        if let Some(max_size) = self.var("MAX_SIZE") {
            let size = max_size.trim().parse().map_err(|_| {
                FlattenError::config_error(format!(
                    "{}_MAX_SIZE must be a number of bytes, got '{}'",
                    self.prefix, max_size
                ))
            })?;
            settings.max_file_size = Some(size);
        }

        if self.flag("NO_COLOR") == Some(true) {
            settings.use_colors = Some(false);
        }

        if let Some(format) = self.var("SUMMARY_FORMAT") {
            settings.summary_format = Some(
                format
                    .parse::<OutputFormat>()
                    .map_err(FlattenError::config_error)?,
            );
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
