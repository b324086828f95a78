//! Module-level import and export facts extracted from source files

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// How an import reference was written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportKind {
    /// `import { a } from "m"` and friends
    Static,
    /// `export { a } from "m"`
    ReExport,
    /// `export * from "m"` or `export * as ns from "m"`
    ReExportAll,
    /// `import("m")`
    Dynamic,
    /// `require("m")`
    Require,
}

/// One statically detected import site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReference {
    /// Module specifier, e.g. "./utils" or "@acme/core"
    pub module_path: String,
    /// Symbol as exported by the target module ("default" for default imports)
    pub imported_symbol: Option<String>,
    /// Local binding name in the importing file
    pub local_name: Option<String>,
    /// The reference binds nothing usable for resolution
    pub is_side_effect_only: bool,
    pub kind: ImportKind,
}

impl ImportReference {
    /// A reference that binds `imported` (seen locally as `local`)
    pub fn symbol(
        module_path: impl Into<String>,
        imported: impl Into<String>,
        local: Option<String>,
        kind: ImportKind,
    ) -> Self {
        Self {
            module_path: module_path.into(),
            imported_symbol: Some(imported.into()),
            local_name: local,
            is_side_effect_only: false,
            kind,
        }
    }

    /// A reference that only loads the module
    pub fn side_effect(module_path: impl Into<String>, kind: ImportKind) -> Self {
        Self {
            module_path: module_path.into(),
            imported_symbol: None,
            local_name: None,
            is_side_effect_only: true,
            kind,
        }
    }

    /// Whether the specifier names a package rather than a relative or absolute path
    pub fn is_bare(&self) -> bool {
        !(self.module_path.starts_with('.')
            || self.module_path.starts_with('/')
            || self.module_path.contains("://"))
    }
}

/// Symbols exported by a single file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSet {
    pub named_exports: BTreeSet<String>,
    pub has_default_export: bool,
    pub re_exported_namespace_names: BTreeSet<String>,
}

impl ExportSet {
    /// Record a named export; `default` also flips the default flag
    pub fn add_named(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name == "default" {
            self.has_default_export = true;
        }
        self.named_exports.insert(name);
    }

    /// Record a default export under the synthetic name `default`
    pub fn add_default(&mut self) {
        self.add_named("default");
    }

    /// Record `export * as name from "..."`
    pub fn add_namespace(&mut self, name: impl Into<String>) {
        self.re_exported_namespace_names.insert(name.into());
    }

    /// The precision gate of dependency resolution
    pub fn provides(&self, symbol: &str) -> bool {
        if symbol == "default" && self.has_default_export {
            return true;
        }
        self.named_exports.contains(symbol) || self.re_exported_namespace_names.contains(symbol)
    }

    /// Number of distinct exported names, namespaces included
    pub fn len(&self) -> usize {
        self.named_exports.len() + self.re_exported_namespace_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named_exports.is_empty()
            && !self.has_default_export
            && self.re_exported_namespace_names.is_empty()
    }
}

/// Type of JavaScript/TypeScript file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FileType {
    JavaScript,
    JavaScriptModule,  // .mjs
    JavaScriptCommon,  // .cjs
    TypeScript,
    TypeScriptModule,  // .mts
    TypeScriptCommon,  // .cts
    TypeScriptReact,   // .tsx
    JavaScriptReact,   // .jsx
    TypeScriptDeclaration, // .d.ts
    Json,
    Other(String),
}

impl FileType {
    /// Determine file type from extension
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let file_name = path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        if file_name.ends_with(".d.ts") {
            return FileType::TypeScriptDeclaration;
        }

        match extension {
            "js" => FileType::JavaScript,
            "mjs" => FileType::JavaScriptModule,
            "cjs" => FileType::JavaScriptCommon,
            "ts" => FileType::TypeScript,
            "mts" => FileType::TypeScriptModule,
            "cts" => FileType::TypeScriptCommon,
            "tsx" => FileType::TypeScriptReact,
            "jsx" => FileType::JavaScriptReact,
            "json" => FileType::Json,
            ext => FileType::Other(ext.to_string()),
        }
    }

    /// Check if this is a TypeScript file
    pub fn is_typescript(&self) -> bool {
        matches!(
            self,
            FileType::TypeScript
                | FileType::TypeScriptModule
                | FileType::TypeScriptCommon
                | FileType::TypeScriptReact
                | FileType::TypeScriptDeclaration
        )
    }

    /// Check if this is a JavaScript file
    pub fn is_javascript(&self) -> bool {
        matches!(
            self,
            FileType::JavaScript | FileType::JavaScriptModule | FileType::JavaScriptCommon | FileType::JavaScriptReact
        )
    }

    /// Files the import/export analyzers understand
    pub fn is_source(&self) -> bool {
        self.is_javascript() || self.is_typescript()
    }
}
