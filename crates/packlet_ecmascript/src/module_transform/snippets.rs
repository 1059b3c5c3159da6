use packlet_runtime::MODULE_HANDLE;
use packlet_utils::ecmascript::{
  property_access_str, to_module_import_export_name, to_string_literal,
};

use super::descriptor::{ImportSymbol, VariableKind};

fn exports_object() -> String {
  format!("{MODULE_HANDLE}.exports")
}

/// `import { a, b as c } from "./m.js"` binds from the resolved export object `binding`:
///
/// ```js
/// const { a, b: c } = m_0;
/// ```
pub fn static_import(binding: &str, symbols: &[ImportSymbol]) -> String {
  let exports = exports_object();
  let mut statements = vec![];

  let named = symbols
    .iter()
    .filter_map(|symbol| match symbol {
      ImportSymbol::Named { imported, local } if imported == local => Some(local.clone()),
      ImportSymbol::Named { imported, local } => {
        Some(format!("{}: {local}", to_module_import_export_name(imported)))
      }
      _ => None,
    })
    .collect::<Vec<_>>();
  if !named.is_empty() {
    statements.push(format!("const {{ {} }} = {binding};", named.join(", ")));
  }

  for symbol in symbols {
    match symbol {
      ImportSymbol::Named { .. } => {}
      ImportSymbol::Namespace { local } => statements.push(format!("const {local} = {binding};")),
      ImportSymbol::ReExport { imported, exported } => statements.push(format!(
        "{} = {};",
        property_access_str(&exports, exported),
        property_access_str(binding, imported)
      )),
      ImportSymbol::ReExportNamespace { exported } => {
        statements.push(format!("{} = {binding};", property_access_str(&exports, exported)));
      }
      ImportSymbol::ReExportAll => statements.push(format!(
        "for (const key in {binding}) if (key !== \"default\" && !(key in {exports})) {exports}[key] = {binding}[key];"
      )),
    }
  }

  statements.join("\n")
}

pub fn dynamic_import(module_id: &str) -> String {
  format!("{MODULE_HANDLE}.import({})", to_string_literal(module_id))
}

pub fn require_call(module_id: &str) -> String {
  format!("{MODULE_HANDLE}.require({})", to_string_literal(module_id))
}

/// `$$module.exports.name = value;`
pub fn export_assignment(name: &str, value: &str) -> String {
  format!("{} = {value};", property_access_str(&exports_object(), name))
}

/// `const name = $$module.exports.name = value;`, the local binding stays usable in the module.
pub fn export_variable(kind: VariableKind, name: &str, value: &str) -> String {
  format!("{} {name} = {}", kind.keyword(), export_assignment(name, value))
}

#[test]
fn test_static_import_snippet() {
  let symbols = vec![
    ImportSymbol::Named { imported: "default".into(), local: "React".into() },
    ImportSymbol::Named { imported: "useState".into(), local: "useState".into() },
    ImportSymbol::Named { imported: "a-b".into(), local: "ab".into() },
  ];
  assert_eq!(
    static_import("react_0", &symbols),
    "const { default: React, useState, \"a-b\": ab } = react_0;"
  );

  let symbols = vec![ImportSymbol::Namespace { local: "ns".into() }];
  assert_eq!(static_import("m_1", &symbols), "const ns = m_1;");

  assert_eq!(static_import("side_2", &[]), "");
}

#[test]
fn test_export_snippets() {
  assert_eq!(export_assignment("a-b", "ab"), "$$module.exports[\"a-b\"] = ab;");
  assert_eq!(
    export_variable(VariableKind::Var, "count", "1"),
    "var count = $$module.exports.count = 1;"
  );
}
