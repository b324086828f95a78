//! Configuration settings validation

use std::path::Path;

use crate::error::{FlattenError, Result};
use crate::models::config::Settings;
use crate::output::STDOUT_PATH;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if let Some(root) = &settings.root {
            if !root.exists() {
                return Err(FlattenError::invalid_path(root));
            }
        }

        if settings.max_file_size == 0 {
            return Err(FlattenError::config_error(
                "Max file size must be at least 1 byte",
            ));
        }

        for (field, names) in [
            ("exclude directory", &settings.exclude_dirs),
            ("exclude file", &settings.exclude_files),
            ("package", &settings.packages),
        ] {
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(FlattenError::config_error(format!(
                    "Empty {} name is not allowed",
                    field
                )));
            }
        }

        if settings.index_file.as_os_str().is_empty() {
            return Err(FlattenError::config_error("Index file name must not be empty"));
        }

        if let Some(path) = &settings.output_file {
            if path != Path::new(STDOUT_PATH) {
                Self::validate_output_path(path)?;
            }
        }

        Ok(())
    }

    /// Validate that the parent of an output path exists and is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.exists() {
            return Err(FlattenError::invalid_path(parent));
        }

        let metadata = std::fs::metadata(parent).map_err(FlattenError::io_error)?;
        if metadata.permissions().readonly() {
            return Err(FlattenError::permission_denied(parent));
        }

        Ok(())
    }
}
