//! Import analysis over a parsed module

use crate::models::module_info::{ImportKind, ImportReference};
use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};

/// Collects every statically detectable import site, in source order
#[derive(Default)]
pub struct ImportCollector {
    imports: Vec<ImportReference>,
}

impl ImportCollector {
    /// Collect the import references of `program`
    pub fn collect(program: &Program<'_>) -> Vec<ImportReference> {
        let mut collector = Self::default();
        collector.visit_program(program);
        collector.imports
    }
}

impl<'a> Visit<'a> for ImportCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let source = decl.source.value.as_str();

        match &decl.specifiers {
            Some(specifiers) if !specifiers.is_empty() => {
                for specifier in specifiers {
                    let reference = match specifier {
                        ImportDeclarationSpecifier::ImportSpecifier(spec) => ImportReference::symbol(
                            source,
                            spec.imported.name().to_string(),
                            Some(spec.local.name.to_string()),
                            ImportKind::Static,
                        ),
                        ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                            ImportReference::symbol(
                                source,
                                "default",
                                Some(spec.local.name.to_string()),
                                ImportKind::Static,
                            )
                        }
                        // A namespace binding names no exported symbol
                        ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                            let mut reference = ImportReference::side_effect(source, ImportKind::Static);
                            reference.local_name = Some(spec.local.name.to_string());
                            reference
                        }
                    };
                    self.imports.push(reference);
                }
            }
            _ => {
                self.imports
                    .push(ImportReference::side_effect(source, ImportKind::Static));
            }
        }
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            let source = source.value.as_str();
            if decl.specifiers.is_empty() {
                self.imports
                    .push(ImportReference::side_effect(source, ImportKind::ReExport));
            }
            for specifier in &decl.specifiers {
                self.imports.push(ImportReference::symbol(
                    source,
                    specifier.local.name().to_string(),
                    Some(specifier.exported.name().to_string()),
                    ImportKind::ReExport,
                ));
            }
        }

        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        let source = decl.source.value.as_str();
        let reference = match &decl.exported {
            Some(exported) => ImportReference::symbol(
                source,
                exported.name().to_string(),
                None,
                ImportKind::ReExportAll,
            ),
            None => ImportReference::side_effect(source, ImportKind::ReExportAll),
        };
        self.imports.push(reference);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        if let Some(specifier) = literal_specifier(&expr.source) {
            self.imports
                .push(ImportReference::side_effect(specifier, ImportKind::Dynamic));
        }

        walk::walk_import_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if let Expression::Identifier(ident) = &call.callee {
            if ident.name == "require" {
                if let Some(specifier) = call
                    .arguments
                    .first()
                    .and_then(|arg| arg.as_expression())
                    .and_then(literal_specifier)
                {
                    self.imports
                        .push(ImportReference::side_effect(specifier, ImportKind::Require));
                }
            }
        }

        walk::walk_call_expression(self, call);
    }
}

/// A string literal or an interpolation-free template literal
fn literal_specifier(expression: &Expression<'_>) -> Option<String> {
    match expression {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => template
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map(|cooked| cooked.to_string()),
        _ => None,
    }
}
