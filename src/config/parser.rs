//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::file::{CONFIG_DIR_NAME, DEFAULT_CONFIG_FILE};
use crate::error::{FlattenError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FlattenError::ConfigNotFound {
            path: path.to_path_buf(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| FlattenError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| FlattenError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn invalid(message: String) -> FlattenError {
    FlattenError::config_error(message)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(root) = &settings.root {
        if root.as_os_str().is_empty() {
            return Err(invalid(format!(
                "Invalid empty root in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(size) = settings.max_file_size {
        if size == 0 {
            return Err(invalid(format!(
                "Invalid max_file_size 0 in config file: {}. Must be at least 1.",
                path.display()
            )));
        }
    }

    for (field, names) in [
        ("exclude_dirs", &settings.exclude_dirs),
        ("exclude_files", &settings.exclude_files),
        ("packages", &settings.packages),
    ] {
        if let Some(names) = names {
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(invalid(format!(
                    "Empty entry in {} in config file: {}",
                    field,
                    path.display()
                )));
            }
        }
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid(format!(
                "Invalid empty output_file in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(index_file) = &settings.index_file {
        if index_file.as_os_str().is_empty() {
            return Err(invalid(format!(
                "Invalid empty index_file in config file: {}",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Candidate default configuration locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(CONFIG_DIR_NAME).join("config.toml"));
    }
    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!("Loading configuration from {}", location.display());
            return Ok(Some(parse_config_file(location)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(FlattenError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(FlattenError::io_error)?;

    Ok(())
}
