use arcstr::ArcStr;
use oxc::span::Span;
use packlet_common::ImportKind;

/// One import-like node of a module: a static import declaration, a re-export with a `from`
/// clause, a dynamic `import("...")` or a `require("...")` call with a literal argument.
#[derive(Debug)]
pub struct ImportDescriptor {
  pub kind: ImportKind,
  pub specifier: ArcStr,
  /// The whole statement for static imports and re-exports, the call expression otherwise.
  pub span: Span,
  /// Always empty for dynamic imports and `require` calls.
  pub symbols: Vec<ImportSymbol>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ImportSymbol {
  /// `import { imported as local }`, `import local from` uses `default` as `imported`.
  Named { imported: String, local: String },
  /// `import * as local`
  Namespace { local: String },
  /// `export { imported as exported } from`
  ReExport { imported: String, exported: String },
  /// `export * as exported from`
  ReExportNamespace { exported: String },
  /// `export * from`
  ReExportAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
  Const,
  Let,
  Var,
}

impl VariableKind {
  pub fn keyword(self) -> &'static str {
    match self {
      Self::Const => "const",
      Self::Let => "let",
      Self::Var => "var",
    }
  }
}

/// How an exported value is bound, which decides where its assignment to the export object goes.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportBinding {
  /// `export const name = value`, rewritten in place keeping the local binding.
  Variable(VariableKind),
  /// `export function local() {}`. The declaration stays verbatim and, being hoisted, is assigned
  /// at the top of the module.
  Function { local: String },
  /// `export class local {}`. The declaration stays verbatim and is assigned right after it.
  Class { local: String },
  /// `export { local as name }`. Assigned at the end of the module, after every declaration it
  /// may refer to.
  Specifier,
  /// `export default <expression>`, also anonymous default functions and classes.
  Expression,
}

/// One `export` statement without a `from` clause.
#[derive(Debug)]
pub struct ExportDescriptor {
  pub span: Span,
  pub declarations: Vec<ExportDeclaration>,
}

#[derive(Debug)]
pub struct ExportDeclaration {
  /// The name importers see, `default` for default exports.
  pub name: String,
  pub binding: ExportBinding,
  /// Source range of the exported value or declaration, `None` renders as `undefined`.
  pub value: Option<Span>,
}

impl ExportDescriptor {
  pub fn contains(&self, span: Span) -> bool {
    self.span.start <= span.start && span.end <= self.span.end
  }
}

impl ExportDeclaration {
  pub fn value_contains(&self, span: Span) -> bool {
    self.value.is_some_and(|value| value.start <= span.start && span.end <= value.end)
  }
}
