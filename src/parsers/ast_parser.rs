//! AST parser wrapper using OXC

use crate::error::{FlattenError, Result};
use crate::models::module_info::{ExportSet, ImportReference};
use crate::parsers::export_analyzer::ExportCollector;
use crate::parsers::import_analyzer::ImportCollector;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use std::fs;
use std::path::{Path, PathBuf};

/// AST parser using OXC
#[derive(Debug, Clone)]
pub struct ASTParser {
    parse_options: ParseOptions,
}

impl ASTParser {
    /// Create a new AST parser
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions {
                allow_return_outside_function: true,
                ..ParseOptions::default()
            },
        }
    }

    /// Source type for a path; unknown extensions parse as ES modules
    pub fn source_type_for(path: &Path) -> SourceType {
        SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs())
    }

    /// Parse `source_text` and hand the program to `analyze` while the allocator is alive
    pub fn with_program<T, F>(&self, path: &Path, source_text: &str, analyze: F) -> Result<T>
    where
        F: FnOnce(&Program<'_>) -> T,
    {
        let allocator = Allocator::default();
        let source_type = Self::source_type_for(path);

        let ret = Parser::new(&allocator, source_text, source_type)
            .with_options(self.parse_options.clone())
            .parse();

        if ret.panicked || !ret.errors.is_empty() {
            return Err(FlattenError::parse_error(path, diagnostic_messages(&ret.errors)));
        }

        Ok(analyze(&ret.program))
    }

    /// Export Analyzer entry point
    pub fn exports_of(&self, path: &Path, source_text: &str) -> Result<ExportSet> {
        self.with_program(path, source_text, ExportCollector::collect)
    }

    /// Import Analyzer entry point
    pub fn imports_of(&self, path: &Path, source_text: &str) -> Result<Vec<ImportReference>> {
        self.with_program(path, source_text, ImportCollector::collect)
    }

    /// Read a file and run both analyzers over a single parse
    pub fn parse_and_analyze(&self, path: &Path) -> Result<FileAnalysis> {
        let source_text = fs::read_to_string(path)
            .map_err(|e| FlattenError::file_read(path, e))?;

        let (imports, exports) = self.with_program(path, &source_text, |program| {
            (ImportCollector::collect(program), ExportCollector::collect(program))
        })?;

        Ok(FileAnalysis {
            path: path.to_path_buf(),
            imports,
            exports,
        })
    }
}

fn diagnostic_messages(errors: &[OxcDiagnostic]) -> Vec<String> {
    if errors.is_empty() {
        return vec!["parser aborted".to_string()];
    }
    errors.iter().map(|e| e.to_string()).collect()
}

impl Default for ASTParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracted analysis data that doesn't depend on AST lifetimes
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub imports: Vec<ImportReference>,
    pub exports: ExportSet,
}
