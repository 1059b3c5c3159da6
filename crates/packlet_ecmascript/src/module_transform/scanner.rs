use arcstr::ArcStr;
use oxc::{
  ast::ast::{
    Argument, CallExpression, Declaration, ExportAllDeclaration,
    ExportDefaultDeclaration, ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression,
    ImportDeclaration, ImportDeclarationSpecifier, ImportExpression, Program,
    VariableDeclarationKind,
  },
  ast_visit::{Visit, walk},
  span::{GetSpan, Span},
};
use packlet_common::{ImportKind, SourceLocation};
use packlet_error::BuildDiagnostic;

use super::descriptor::{
  ExportBinding, ExportDeclaration, ExportDescriptor, ImportDescriptor, ImportSymbol,
  VariableKind,
};

/// Collects the import-like and export-like nodes of a module in source order.
pub struct ModuleScanner<'me> {
  path: &'me str,
  source: &'me str,
  pub imports: Vec<ImportDescriptor>,
  pub exports: Vec<ExportDescriptor>,
  pub hashbang: Option<Span>,
  pub errors: Vec<BuildDiagnostic>,
}

impl<'me> ModuleScanner<'me> {
  pub fn new(path: &'me str, source: &'me str) -> Self {
    Self {
      path,
      source,
      imports: Vec::new(),
      exports: Vec::new(),
      hashbang: None,
      errors: Vec::new(),
    }
  }

  fn add_import(
    &mut self,
    kind: ImportKind,
    specifier: &str,
    span: Span,
    symbols: Vec<ImportSymbol>,
  ) {
    self.imports.push(ImportDescriptor { kind, specifier: ArcStr::from(specifier), span, symbols });
  }

  fn unsupported(&mut self, span: Span, description: &'static str) {
    let location = SourceLocation::compute(self.source, self.path, span.start, span.end);
    self.errors.push(BuildDiagnostic::unsupported_syntax(
      self.path,
      location.to_string(),
      description,
    ));
  }

  /// `require("...")` with exactly one string literal argument.
  fn as_require_call<'a>(expr: &'a CallExpression) -> Option<&'a str> {
    match (&expr.callee, expr.arguments.as_slice()) {
      (Expression::Identifier(callee), [Argument::StringLiteral(request)])
        if callee.name.as_str() == "require" =>
      {
        Some(request.value.as_str())
      }
      _ => None,
    }
  }

  fn declaration_exports(&mut self, declaration: &Declaration) -> Vec<ExportDeclaration> {
    match declaration {
      Declaration::VariableDeclaration(var_decl) => {
        let kind = match var_decl.kind {
          VariableDeclarationKind::Var => VariableKind::Var,
          VariableDeclarationKind::Let => VariableKind::Let,
          _ => VariableKind::Const,
        };
        let mut declarations = Vec::with_capacity(var_decl.declarations.len());
        for declarator in &var_decl.declarations {
          let Some(name) = declarator.id.get_identifier_name() else {
            self.unsupported(declarator.span, "destructuring patterns in exported declarations");
            continue;
          };
          declarations.push(ExportDeclaration {
            name: name.to_string(),
            binding: ExportBinding::Variable(kind),
            value: declarator.init.as_ref().map(GetSpan::span),
          });
        }
        declarations
      }
      Declaration::FunctionDeclaration(func) => func
        .id
        .as_ref()
        .map(|id| ExportDeclaration {
          name: id.name.to_string(),
          binding: ExportBinding::Function { local: id.name.to_string() },
          value: Some(func.span),
        })
        .into_iter()
        .collect(),
      Declaration::ClassDeclaration(class) => class
        .id
        .as_ref()
        .map(|id| ExportDeclaration {
          name: id.name.to_string(),
          binding: ExportBinding::Class { local: id.name.to_string() },
          value: Some(class.span),
        })
        .into_iter()
        .collect(),
      _ => {
        self.unsupported(declaration.span(), "TypeScript declarations");
        vec![]
      }
    }
  }
}

impl<'a> Visit<'a> for ModuleScanner<'_> {
  fn visit_program(&mut self, program: &Program<'a>) {
    self.hashbang = program.hashbang.as_ref().map(GetSpan::span);
    walk::walk_program(self, program);
  }

  fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
    let symbols = decl
      .specifiers
      .iter()
      .flatten()
      .map(|specifier| match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(s) => ImportSymbol::Named {
          imported: s.imported.name().to_string(),
          local: s.local.name.to_string(),
        },
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
          ImportSymbol::Named { imported: "default".to_string(), local: s.local.name.to_string() }
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
          ImportSymbol::Namespace { local: s.local.name.to_string() }
        }
      })
      .collect();
    self.add_import(ImportKind::Import, decl.source.value.as_str(), decl.span, symbols);
  }

  fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
    if let Expression::StringLiteral(request) = &expr.source {
      self.add_import(ImportKind::DynamicImport, request.value.as_str(), expr.span, vec![]);
    }
    walk::walk_import_expression(self, expr);
  }

  fn visit_call_expression(&mut self, expr: &CallExpression<'a>) {
    if let Some(request) = Self::as_require_call(expr) {
      self.add_import(ImportKind::Require, request, expr.span, vec![]);
    }
    walk::walk_call_expression(self, expr);
  }

  fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
    if let Some(source) = &decl.source {
      let symbols = decl
        .specifiers
        .iter()
        .map(|s| ImportSymbol::ReExport {
          imported: s.local.name().to_string(),
          exported: s.exported.name().to_string(),
        })
        .collect();
      self.add_import(ImportKind::Import, source.value.as_str(), decl.span, symbols);
      return;
    }

    let declarations = match &decl.declaration {
      Some(declaration) => self.declaration_exports(declaration),
      None => decl
        .specifiers
        .iter()
        .map(|s| ExportDeclaration {
          name: s.exported.name().to_string(),
          binding: ExportBinding::Specifier,
          value: Some(s.local.span()),
        })
        .collect(),
    };
    self.exports.push(ExportDescriptor { span: decl.span, declarations });
    walk::walk_export_named_declaration(self, decl);
  }

  fn visit_export_default_declaration(&mut self, decl: &ExportDefaultDeclaration<'a>) {
    let (binding, value) = match &decl.declaration {
      ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
        let binding = func.id.as_ref().map_or(ExportBinding::Expression, |id| {
          ExportBinding::Function { local: id.name.to_string() }
        });
        (binding, func.span)
      }
      ExportDefaultDeclarationKind::ClassDeclaration(class) => {
        let binding = class.id.as_ref().map_or(ExportBinding::Expression, |id| {
          ExportBinding::Class { local: id.name.to_string() }
        });
        (binding, class.span)
      }
      // A bare identifier is exported as the value itself.
      kind => (ExportBinding::Expression, kind.span()),
    };
    self.exports.push(ExportDescriptor {
      span: decl.span,
      declarations: vec![ExportDeclaration {
        name: "default".to_string(),
        binding,
        value: Some(value),
      }],
    });
    walk::walk_export_default_declaration(self, decl);
  }

  fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
    let symbol = match &decl.exported {
      Some(exported) => ImportSymbol::ReExportNamespace { exported: exported.name().to_string() },
      None => ImportSymbol::ReExportAll,
    };
    self.add_import(ImportKind::Import, decl.source.value.as_str(), decl.span, vec![symbol]);
  }
}
