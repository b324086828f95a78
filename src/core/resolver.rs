//! One-hop dependency resolution across workspace packages
//!
//! A whole-word text search narrows each imported package to candidate files,
//! then the export analyzer keeps only the candidates that actually export the
//! imported symbol.

use crate::core::registry::{DiscoveryOptions, WorkspaceRegistry};
use crate::error::{try_with_recovery, FlattenError, Result};
use crate::models::module_info::{FileType, ImportReference};
use crate::parsers::ast_parser::ASTParser;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extensions searched for symbol definitions
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Resolution settings passed explicitly by the caller
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Directories skipped while searching package trees
    pub search_exclusions: DiscoveryOptions,
}

/// Resolves import references to the files defining the imported symbols
pub struct DependencyResolver<'r> {
    registry: &'r WorkspaceRegistry,
    parser: ASTParser,
    config: ResolverConfig,
}

impl<'r> DependencyResolver<'r> {
    pub fn new(registry: &'r WorkspaceRegistry, config: ResolverConfig) -> Self {
        Self {
            registry,
            parser: ASTParser::new(),
            config,
        }
    }

    /// Files defining the symbols `imports` pulls from workspace packages, plus `origin`
    pub fn resolve(&self, origin: &Path, imports: &[ImportReference]) -> Result<BTreeSet<PathBuf>> {
        let mut resolved = BTreeSet::new();
        resolved.insert(origin.to_path_buf());

        for reference in imports {
            if !reference.is_bare() {
                continue;
            }
            let Some(package) = self.registry.lookup_specifier(&reference.module_path) else {
                continue;
            };
            let Some(symbol) = reference.imported_symbol.as_deref() else {
                debug!(
                    "'{}' binds no symbol, nothing to resolve",
                    reference.module_path
                );
                continue;
            };

            let candidates = self.search_candidates(&package.directory, symbol)?;
            debug!(
                "{} candidate(s) for '{}' in package '{}'",
                candidates.len(),
                symbol,
                package.name
            );

            for (candidate, text) in candidates {
                match self.parser.exports_of(&candidate, &text) {
                    Ok(exports) if exports.provides(symbol) => {
                        debug!("'{}' resolved to {}", symbol, candidate.display());
                        resolved.insert(candidate);
                    }
                    Ok(_) => {}
                    Err(err) => debug!("Dropping candidate: {}", err.user_message()),
                }
            }
        }

        Ok(resolved)
    }

    /// Parse `origin` and resolve its imports
    pub fn resolve_file(&self, origin: &Path) -> Result<BTreeSet<PathBuf>> {
        let analysis = self.parser.parse_and_analyze(origin)?;
        debug!(
            "{}: {} import(s), {} export(s)",
            analysis.path.display(),
            analysis.imports.len(),
            analysis.exports.len()
        );
        self.resolve(origin, &analysis.imports)
    }

    /// Source files under `directory` mentioning `symbol` as a whole word, with their text
    pub fn search_candidates(&self, directory: &Path, symbol: &str) -> Result<Vec<(PathBuf, String)>> {
        let pattern = whole_word_pattern(symbol)
            .map_err(|e| FlattenError::resolution_search(symbol, directory, e.to_string()))?;

        if !directory.is_dir() {
            return Err(FlattenError::resolution_search(
                symbol,
                directory,
                "package directory is not readable",
            ));
        }

        let exclusions = &self.config.search_exclusions;
        let walker = WalkDir::new(directory)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !exclusions.is_excluded_dir(&entry.file_name().to_string_lossy())
            });

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(FlattenError::resolution_search(
                        symbol,
                        directory,
                        err.to_string(),
                    ));
                }
                Err(err) => {
                    debug!("Skipping unreadable entry during symbol search: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !has_source_extension(entry.path()) {
                continue;
            }

            match fs::read(entry.path()) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    if pattern.is_match(&text) {
                        candidates.push((entry.into_path(), text.into_owned()));
                    }
                }
                Err(err) => debug!("Skipping candidate {}: {}", entry.path().display(), err),
            }
        }

        Ok(candidates)
    }

    /// Expand explicit files with their resolved dependencies.
    ///
    /// Each origin comes first followed by its resolved files in sorted order;
    /// files already listed are not repeated. An origin whose resolution fails
    /// with a recoverable error contributes only itself.
    pub fn expand_targets(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut targets = Vec::new();

        for origin in files {
            if seen.insert(origin.clone()) {
                targets.push(origin.clone());
            }

            if !FileType::from_path(origin).is_source() {
                debug!("{} is not a source file, nothing to resolve", origin.display());
                continue;
            }

            let Some(resolved) = try_with_recovery(|| self.resolve_file(origin))? else {
                debug!("Dependency expansion failed for {}", origin.display());
                continue;
            };

            for path in resolved {
                if seen.insert(path.clone()) {
                    targets.push(path);
                }
            }
        }

        Ok(targets)
    }
}

/// `symbol` bounded by non-identifier characters
pub fn whole_word_pattern(symbol: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?:^|[^\w$]){}(?:$|[^\w$])", regex::escape(symbol)))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::module_info::ImportKind;
    use crate::models::selection::SelectionPolicy;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn setup() -> (TempDir, WorkspaceRegistry) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "pkg-a/package.json", &json!({ "name": "pkg-a" }).to_string());
        write(root, "pkg-a/index.js", "export function helper() { return 1; }\n");
        write(root, "pkg-a/uses.js", "import { helper } from './index.js';\nhelper();\n");
        write(root, "pkg-a/default.js", "export default function main() {}\n");
        write(root, "pkg-a/node_modules/x/index.js", "export const helper = 2;\n");
        write(root, "pkg-a/notes.md", "helper is exported\n");
        write(root, "pkg-b/package.json", &json!({ "name": "pkg-b" }).to_string());
        write(root, "pkg-b/main.js", "import { helper } from 'pkg-a';\nhelper();\n");

        let options = DiscoveryOptions::from_policy(&SelectionPolicy::new(root));
        let registry = WorkspaceRegistry::discover(root, &options);
        (dir, registry)
    }

    fn resolver(registry: &WorkspaceRegistry) -> DependencyResolver<'_> {
        let options = DiscoveryOptions::from_policy(&SelectionPolicy::new(registry.root()));
        DependencyResolver::new(registry, ResolverConfig { search_exclusions: options })
    }

    #[test]
    fn test_whole_word_pattern() {
        let pattern = whole_word_pattern("helper").unwrap();
        assert!(pattern.is_match("export { helper }"));
        assert!(pattern.is_match("helper"));
        assert!(!pattern.is_match("helpers"));
        assert!(!pattern.is_match("$helper"));
        assert!(!pattern.is_match("my_helper"));

        let dollar = whole_word_pattern("$store").unwrap();
        assert!(dollar.is_match("export const $store = 1"));
    }

    #[test]
    fn test_candidates_are_source_files_outside_excluded_dirs() {
        let (dir, registry) = setup();
        let resolver = resolver(&registry);
        let candidates: Vec<_> = resolver
            .search_candidates(&dir.path().join("pkg-a"), "helper")
            .unwrap()
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            candidates,
            vec![dir.path().join("pkg-a/index.js"), dir.path().join("pkg-a/uses.js")]
        );
    }

    #[test]
    fn test_resolution_keeps_only_exporting_files() {
        let (dir, registry) = setup();
        let origin = dir.path().join("pkg-b/main.js");
        let resolved = resolver(&registry).resolve_file(&origin).unwrap();

        let expected: BTreeSet<_> = [origin.clone(), dir.path().join("pkg-a/index.js")]
            .into_iter()
            .collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_default_and_unmatched_symbols() {
        let (dir, registry) = setup();
        let origin = dir.path().join("pkg-b/main.js");
        let imports = vec![
            ImportReference::symbol("pkg-a", "default", Some("main".into()), ImportKind::Static),
            ImportReference::symbol("pkg-a", "missing", None, ImportKind::Static),
            ImportReference::side_effect("pkg-a", ImportKind::Dynamic),
            ImportReference::symbol("react", "useState", None, ImportKind::Static),
            ImportReference::symbol("../pkg-a/index.js", "helper", None, ImportKind::Static),
        ];
        let resolved = resolver(&registry).resolve(&origin, &imports).unwrap();
        let expected: BTreeSet<_> = [origin.clone(), dir.path().join("pkg-a/default.js")]
            .into_iter()
            .collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_missing_package_directory_is_search_error() {
        let (dir, registry) = setup();
        fs::remove_dir_all(dir.path().join("pkg-a")).unwrap();
        let origin = dir.path().join("pkg-b/main.js");
        let err = resolver(&registry).resolve_file(&origin).unwrap_err();
        assert!(matches!(err, FlattenError::ResolutionSearch { .. }));
    }

    #[test]
    fn test_expand_targets_orders_and_deduplicates() {
        let (dir, registry) = setup();
        let root = dir.path();
        let broken = write(root, "pkg-b/broken.js", "import { = from 'pkg-a';");
        let main = root.join("pkg-b/main.js");
        let index = root.join("pkg-a/index.js");

        let targets = resolver(&registry)
            .expand_targets(&[main.clone(), broken.clone(), index.clone()])
            .unwrap();
        assert_eq!(targets, vec![main, index, broken]);
    }
}
