//! Package.json parsing functionality
//!
//! Only the fields the workspace registry needs are extracted: the package
//! name, its description, the `exports` map and the root `workspaces` field.

use crate::error::{FlattenError, Result};
use crate::parsers::exports::ExportsParser;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// The parts of a package.json the registry cares about
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exports: BTreeMap<String, Value>,
    /// Glob patterns from `workspaces` (array or `{ "packages": [...] }` form)
    pub workspaces: Option<Vec<String>>,
}

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse package.json content
    pub fn parse(content: &str) -> Result<PackageManifest> {
        Self::parse_at(content, Path::new("package.json"))
    }

    /// Parse package.json file from a path
    pub fn parse_file(path: &Path) -> Result<PackageManifest> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FlattenError::file_read(path, e))?;
        Self::parse_at(&content, path)
    }

    fn parse_at(content: &str, path: &Path) -> Result<PackageManifest> {
        let json_value: Value =
            serde_json::from_str(content).map_err(|e| FlattenError::json_parse_error(path, e))?;

        let obj = match json_value {
            Value::Object(obj) => obj,
            _ => {
                return Err(FlattenError::invalid_package_json(
                    path,
                    "Root value is not an object",
                ))
            }
        };

        Ok(PackageManifest {
            name: Self::extract_optional_string(&obj, "name"),
            description: Self::extract_optional_string(&obj, "description"),
            exports: obj
                .get("exports")
                .map(ExportsParser::normalize)
                .unwrap_or_default(),
            workspaces: Self::extract_workspaces(&obj),
        })
    }

    /// Require a string `name`, the registry skips manifests without one
    pub fn require_name(manifest: &PackageManifest, path: &Path) -> Result<String> {
        match &manifest.name {
            Some(name) if !name.trim().is_empty() => Ok(name.clone()),
            Some(_) => Err(FlattenError::invalid_package_json(path, "Field 'name' is empty")),
            None => Err(FlattenError::invalid_package_json(
                path,
                "Required field 'name' is missing or not a string",
            )),
        }
    }

    fn extract_optional_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
        match obj.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn extract_workspaces(obj: &Map<String, Value>) -> Option<Vec<String>> {
        let patterns = match obj.get("workspaces")? {
            Value::Array(arr) => arr,
            Value::Object(map) => match map.get("packages") {
                Some(Value::Array(arr)) => arr,
                _ => return None,
            },
            _ => return None,
        };

        Some(
            patterns
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }
}
