//! Parsing functionality for source and manifest files
//!
//! This module provides the import/export analyzers built on the OXC AST, as
//! well as parsers for package.json, its exports field and workspace manifests.

pub mod ast_parser;
pub mod export_analyzer;
pub mod exports;
pub mod import_analyzer;
pub mod package_json;
pub mod workspace_manifest;

pub use ast_parser::{ASTParser, FileAnalysis};
pub use export_analyzer::ExportCollector;
pub use exports::ExportsParser;
pub use import_analyzer::ImportCollector;
pub use package_json::{PackageJsonParser, PackageManifest};
pub use workspace_manifest::WorkspaceManifest;
