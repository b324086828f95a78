//! Exports field parsing functionality
//!
//! Normalizes the many shapes of the package.json `exports` field into a single
//! subpath map, e.g. `"./index.js"` becomes `{ ".": "./index.js" }`.

use serde_json::Value;
use std::collections::BTreeMap;

/// Parser for package.json exports field
pub struct ExportsParser;

impl ExportsParser {
    /// Normalize an `exports` value to subpath -> target
    pub fn normalize(exports: &Value) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        match exports {
            Value::String(_) | Value::Array(_) => {
                map.insert(".".to_string(), exports.clone());
            }
            Value::Object(obj) if obj.is_empty() => {}
            Value::Object(obj) if Self::is_subpath_map(exports) => {
                for (subpath, target) in obj {
                    map.insert(subpath.clone(), target.clone());
                }
            }
            // Conditions object ({ "import": ..., "require": ... }) for the root entry
            Value::Object(_) => {
                map.insert(".".to_string(), exports.clone());
            }
            _ => {}
        }
        map
    }

    /// Whether every key of an object is a subpath (`.` or `./...`)
    pub fn is_subpath_map(exports: &Value) -> bool {
        match exports {
            Value::Object(obj) => !obj.is_empty() && obj.keys().all(|key| key.starts_with('.')),
            _ => false,
        }
    }
}
