//! Export analysis over a parsed module

use crate::models::module_info::ExportSet;
use oxc_ast::ast::*;

/// Collects the exported surface of one module from its top-level statements
pub struct ExportCollector {
    exports: ExportSet,
}

impl ExportCollector {
    /// Collect every symbol `program` exports
    pub fn collect(program: &Program<'_>) -> ExportSet {
        let mut collector = Self {
            exports: ExportSet::default(),
        };
        for statement in &program.body {
            collector.visit_statement(statement);
        }
        collector.exports
    }

    fn visit_statement(&mut self, statement: &Statement<'_>) {
        match statement {
            Statement::ExportNamedDeclaration(decl) => {
                if let Some(declaration) = &decl.declaration {
                    self.visit_declaration(declaration);
                }
                for specifier in &decl.specifiers {
                    self.exports.add_named(specifier.exported.name().to_string());
                }
            }
            Statement::ExportDefaultDeclaration(_) | Statement::TSExportAssignment(_) => {
                self.exports.add_default();
            }
            Statement::ExportAllDeclaration(decl) => {
                // `export * from` contributes nothing nameable here
                if let Some(exported) = &decl.exported {
                    self.exports.add_namespace(exported.name().to_string());
                }
            }
            Statement::ExpressionStatement(expr) => {
                self.visit_commonjs_assignment(&expr.expression);
            }
            _ => {}
        }
    }

    fn visit_declaration(&mut self, declaration: &Declaration<'_>) {
        match declaration {
            Declaration::VariableDeclaration(var_decl) => {
                for declarator in &var_decl.declarations {
                    let mut names = Vec::new();
                    collect_binding_names(&declarator.id, &mut names);
                    for name in names {
                        self.exports.add_named(name);
                    }
                }
            }
            Declaration::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    self.exports.add_named(id.name.to_string());
                }
            }
            Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.exports.add_named(id.name.to_string());
                }
            }
            Declaration::TSTypeAliasDeclaration(alias) => {
                self.exports.add_named(alias.id.name.to_string());
            }
            Declaration::TSInterfaceDeclaration(interface) => {
                self.exports.add_named(interface.id.name.to_string());
            }
            Declaration::TSEnumDeclaration(ts_enum) => {
                self.exports.add_named(ts_enum.id.name.to_string());
            }
            Declaration::TSModuleDeclaration(module) => {
                if let TSModuleDeclarationName::Identifier(id) = &module.id {
                    self.exports.add_named(id.name.to_string());
                }
            }
            _ => {}
        }
    }

    /// `exports.x = ...`, `module.exports.x = ...` and `module.exports = ...`
    fn visit_commonjs_assignment(&mut self, expression: &Expression<'_>) {
        let Expression::AssignmentExpression(assign) = expression else {
            return;
        };
        let AssignmentTarget::StaticMemberExpression(member) = &assign.left else {
            return;
        };

        match &member.object {
            Expression::Identifier(object) if object.name == "exports" => {
                self.exports.add_named(member.property.name.to_string());
            }
            Expression::Identifier(object)
                if object.name == "module" && member.property.name == "exports" =>
            {
                self.exports.add_default();
            }
            Expression::StaticMemberExpression(inner) if is_module_exports(inner) => {
                self.exports.add_named(member.property.name.to_string());
            }
            _ => {}
        }
    }
}

fn is_module_exports(member: &StaticMemberExpression<'_>) -> bool {
    matches!(&member.object, Expression::Identifier(object) if object.name == "module")
        && member.property.name == "exports"
}

/// Every identifier bound by a (possibly destructuring) pattern
fn collect_binding_names(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => {
            names.push(id.name.to_string());
        }
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                collect_binding_names(&property.value, names);
            }
            if let Some(rest) = &object.rest {
                collect_binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                collect_binding_names(element, names);
            }
            if let Some(rest) = &array.rest {
                collect_binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => {
            collect_binding_names(&assign.left, names);
        }
    }
}
