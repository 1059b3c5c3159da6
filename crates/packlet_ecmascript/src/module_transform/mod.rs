mod descriptor;
mod scanner;
mod snippets;
mod splice;

use std::path::Path;

use arcstr::ArcStr;
use oxc::{ast_visit::Visit, span::Span};
use packlet_common::{ImportKind, ModuleId};
use packlet_error::{BuildError, BuildResult};
use packlet_utils::{ecmascript::legitimize_identifier_name, path_ext::PathExt};

use self::{
  descriptor::{ExportBinding, ImportDescriptor},
  scanner::ModuleScanner,
  splice::{Edit, splice},
};
use crate::{
  EcmaCompiler,
  registration::{COMMONJS_PRELUDE, render_registration},
};

/// A reference found by [transform_module], already resolved to the id it is registered under.
#[derive(Debug, Clone)]
pub struct ModuleImport {
  pub specifier: ArcStr,
  pub kind: ImportKind,
  pub span: Span,
  pub module_id: ModuleId,
}

#[derive(Debug)]
pub struct TransformedModule {
  pub code: String,
  /// Every static, dynamic and `require` reference in source order.
  pub imports: Vec<ModuleImport>,
}

struct ResolvedImport {
  descriptor: ImportDescriptor,
  module_id: ModuleId,
  /// Parameter of the registration factory receiving the export object, static imports only.
  binding: String,
}

impl ResolvedImport {
  fn render(&self) -> String {
    match self.descriptor.kind {
      ImportKind::Import => snippets::static_import(&self.binding, &self.descriptor.symbols),
      ImportKind::DynamicImport => snippets::dynamic_import(&self.module_id),
      ImportKind::Require => snippets::require_call(&self.module_id),
    }
  }
}

/// Rewrites the module at `path` into a registration call under `module_id`.
///
/// `resolve` maps a specifier as written in the module to the module id of its target.
pub fn transform_module<F>(
  path: &str,
  source: &str,
  module_id: &str,
  mut resolve: F,
) -> BuildResult<TransformedModule>
where
  F: FnMut(&str) -> BuildResult<ModuleId>,
{
  let ast = EcmaCompiler::parse(path, source, EcmaCompiler::source_type_for(path))?;

  let mut scanner = ModuleScanner::new(path, source);
  scanner.visit_program(ast.program());
  if !scanner.errors.is_empty() {
    return Err(BuildError::from(scanner.errors));
  }
  let ModuleScanner { imports, exports, hashbang, .. } = scanner;

  let imports = imports
    .into_iter()
    .enumerate()
    .map(|(idx, descriptor)| {
      let module_id = resolve(&descriptor.specifier)?;
      let name = Path::new(descriptor.specifier.as_str()).representative_file_name().into_owned();
      let binding = format!("{}_{idx}", legitimize_identifier_name(&name));
      Ok(ResolvedImport { descriptor, module_id, binding })
    })
    .collect::<BuildResult<Vec<_>>>()?;

  let mut edits = Vec::with_capacity(imports.len() + exports.len() + 1);
  if let Some(hashbang) = hashbang {
    edits.push(Edit::new(hashbang, ""));
  }

  // Hoisted function exports go first, specifier exports last, so neither reads a binding before
  // its declaration ran.
  let mut leading = vec![];
  let mut trailing = vec![];
  for export in &exports {
    let mut statements = vec![];
    for declaration in &export.declarations {
      let value = match declaration.value {
        // Imports nested in the exported value are rewritten inside the value text.
        Some(value) => {
          let nested = imports
            .iter()
            .filter(|import| declaration.value_contains(import.descriptor.span))
            .map(|import| Edit::new(import.descriptor.span, import.render()).rebased(value.start))
            .collect();
          splice(value.source_text(source), nested)
        }
        None => "undefined".to_string(),
      };
      match &declaration.binding {
        ExportBinding::Variable(kind) => {
          statements.push(snippets::export_variable(*kind, &declaration.name, &value));
        }
        ExportBinding::Function { local } => {
          statements.push(value);
          leading.push(snippets::export_assignment(&declaration.name, local));
        }
        ExportBinding::Class { local } => {
          statements.push(value);
          statements.push(snippets::export_assignment(&declaration.name, local));
        }
        ExportBinding::Specifier => {
          trailing.push(snippets::export_assignment(&declaration.name, &value));
        }
        ExportBinding::Expression => {
          statements.push(snippets::export_assignment(&declaration.name, &value));
        }
      }
    }
    edits.push(Edit::new(export.span, statements.join("\n")));
  }

  for import in &imports {
    if !exports.iter().any(|export| export.contains(import.descriptor.span)) {
      edits.push(Edit::new(import.descriptor.span, import.render()));
    }
  }

  let body = std::iter::once(COMMONJS_PRELUDE.to_string())
    .chain(leading)
    .chain(std::iter::once(splice(source, edits)))
    .chain(trailing)
    .collect::<Vec<_>>()
    .join("\n");

  let static_imports = || imports.iter().filter(|import| import.descriptor.kind.is_static());
  let commonjs_imports = imports.iter().filter(|import| import.descriptor.kind == ImportKind::Require);
  let dependencies = static_imports()
    .chain(commonjs_imports)
    .map(|import| import.module_id.as_ref())
    .collect::<Vec<_>>();
  let parameters = static_imports().map(|import| import.binding.as_str()).collect::<Vec<_>>();

  let code = render_registration(module_id, &dependencies, &parameters, &body);

  let imports = imports
    .into_iter()
    .map(|import| ModuleImport {
      specifier: import.descriptor.specifier,
      kind: import.descriptor.kind,
      span: import.descriptor.span,
      module_id: import.module_id,
    })
    .collect();

  Ok(TransformedModule { code, imports })
}

#[cfg(test)]
fn resolve_in_place(specifier: &str) -> BuildResult<ModuleId> {
  Ok(match specifier {
    "fs" => ModuleId::new("node:fs"),
    _ => ModuleId::new(specifier.trim_start_matches("./")),
  })
}

#[cfg(test)]
fn reparse(code: &str) {
  EcmaCompiler::parse("output.js", code, oxc::span::SourceType::default()).unwrap();
}

#[test]
fn test_static_import_becomes_binding() {
  let source = "import { a as b } from \"./m.js\";\nconsole.log(b);\n";
  let module = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap();

  assert!(module.code.starts_with(
    "$$register(\"main.js\", [\"m.js\"], function($$module, m_0) {\nconst module = $$module, exports = $$module.exports;\n"
  ));
  assert!(module.code.contains("const { a: b } = m_0;\nconsole.log(b);"));
  assert!(module.code.ends_with("\n});"));
  assert_eq!(module.imports.len(), 1);
  assert_eq!(&*module.imports[0].module_id, "m.js");
  reparse(&module.code);
}

#[test]
fn test_export_after_imports_keeps_initializer() {
  let initializer = "compute(a, x, y, ns.z) + \"tail\"";
  let source = format!(
    "import {{ a }} from \"./a.js\";\nimport {{ longer_name as x, y }} from \"./some/deeper/module.js\";\nimport * as ns from \"./n.js\";\nexport const value = {initializer};\n"
  );
  let module = transform_module("/project/main.js", &source, "main.js", resolve_in_place).unwrap();

  assert!(module.code.contains("const { a } = a_0;\n"));
  assert!(module.code.contains("const { longer_name: x, y } = module_1;\n"));
  assert!(module.code.contains("const ns = n_2;\n"));
  assert!(
    module.code.contains(&format!("const value = $$module.exports.value = {initializer};"))
  );
  assert!(module.code.contains("function($$module, a_0, module_1, n_2)"));
  reparse(&module.code);
}

#[test]
fn test_dynamic_and_static_import_of_same_target() {
  let source = "import d from \"./d.js\";\nconst lazy = () => import(\"./d.js\");\n";
  let module = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap();

  let kinds = module.imports.iter().map(|import| import.kind).collect::<Vec<_>>();
  assert_eq!(kinds, [ImportKind::Import, ImportKind::DynamicImport]);
  assert!(module.imports.iter().all(|import| &*import.module_id == "d.js"));
  assert!(module.code.contains("[\"d.js\"], function($$module, d_0)"));
  assert!(module.code.contains("const { default: d } = d_0;"));
  assert!(module.code.contains("const lazy = () => $$module.import(\"d.js\");"));
  reparse(&module.code);
}

#[test]
fn test_imports_nested_in_exports() {
  let source = "export const load = () => import(\"./page.js\");\nexport default require(\"./config.json\");\n";
  let module = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap();

  assert!(
    module.code.contains("const load = $$module.exports.load = () => $$module.import(\"page.js\");")
  );
  assert!(module.code.contains("$$module.exports.default = $$module.require(\"config.json\");"));
  assert!(module.code.contains("[\"config.json\"], function($$module)"));
  reparse(&module.code);
}

#[test]
fn test_declarations_and_specifiers() {
  let source = "#!/usr/bin/env node\nfunction helper() { return 1; }\nconst answer = 42;\nexport let counter;\nexport { helper, answer as \"the-answer\" };\nexport default function main() {}\n";
  let module = transform_module("/project/cli.js", source, "cli.js", resolve_in_place).unwrap();

  assert!(!module.code.contains("#!"));
  assert!(module.code.contains("let counter = $$module.exports.counter = undefined;"));
  assert!(module.code.contains("\nfunction main() {}\n"));
  assert!(module.code.ends_with(
    "\n$$module.exports.helper = helper;\n$$module.exports[\"the-answer\"] = answer;\n});"
  ));
  reparse(&module.code);
}

#[test]
fn test_function_export_is_assigned_before_the_body_runs() {
  let source = "globalThis.out = f();\nexport function f() { return 1; }\n";
  let module = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap();

  assert!(module.code.contains(&format!(
    "{COMMONJS_PRELUDE}\n$$module.exports.f = f;\nglobalThis.out = f();\nfunction f() {{ return 1; }}\n"
  )));
  reparse(&module.code);
}

#[test]
fn test_specifier_export_is_assigned_after_declarations() {
  let source = "export { a, C as Shape };\nconst a = 5;\nexport class C {}\n";
  let module = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap();

  let declared = module.code.find("const a = 5;").unwrap();
  let assigned = module.code.find("$$module.exports.a = a;").unwrap();
  assert!(declared < assigned);
  assert!(module.code.contains("class C {}\n$$module.exports.C = C;"));
  assert!(module.code.contains("$$module.exports.a = a;\n$$module.exports.Shape = C;\n});"));
  reparse(&module.code);
}

#[test]
fn test_var_export_keeps_var_binding() {
  let source = "export var x = 1;\nvar x;\n";
  let module = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap();

  assert!(module.code.contains("var x = $$module.exports.x = 1;\nvar x;"));
  reparse(&module.code);
}

#[test]
fn test_re_exports() {
  let source = "export * from \"./a.js\";\nexport { b as c } from \"./b.js\";\nexport * as all from \"./a.js\";\n";
  let module = transform_module("/project/index.js", source, "index.js", resolve_in_place).unwrap();

  assert!(module.code.contains("[\"a.js\", \"b.js\", \"a.js\"], function($$module, a_0, b_1, a_2)"));
  assert!(module.code.contains("$$module.exports.c = b_1.b;"));
  assert!(module.code.contains("$$module.exports.all = a_2;"));
  reparse(&module.code);
}

#[test]
fn test_commonjs_module() {
  let source = "const fs = require(\"fs\");\nconst name = \"./\" + \"x.js\";\nrequire(name);\nmodule.exports = { read: fs.readFileSync };\n";
  let module = transform_module("/project/lib.cjs", source, "lib.cjs", resolve_in_place).unwrap();

  assert_eq!(module.imports.len(), 1);
  assert_eq!(module.imports[0].kind, ImportKind::Require);
  assert!(module.code.contains("[\"node:fs\"], function($$module)"));
  assert!(module.code.contains("const fs = $$module.require(\"node:fs\");"));
  assert!(module.code.contains("require(name);"));
  reparse(&module.code);
}

#[test]
fn test_destructuring_export_is_rejected() {
  let source = "const obj = { a: 1 };\nexport const { a } = obj;\n";
  let err = transform_module("/project/main.js", source, "main.js", resolve_in_place).unwrap_err();
  assert!(err.to_string().contains("/project/main.js:2:14"));
  assert!(err.to_string().contains("destructuring"));
}

#[test]
fn test_resolve_failure_is_propagated() {
  let source = "import \"./missing.js\";\n";
  let err = transform_module("/project/main.js", source, "main.js", |specifier| {
    Err(packlet_error::BuildDiagnostic::unresolved_import(specifier, "/project", "not found").into())
  })
  .unwrap_err();
  assert!(err.to_string().contains("./missing.js"));
}
