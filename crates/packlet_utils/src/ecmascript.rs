use std::sync::LazyLock;

use oxc::syntax::identifier;
use regex::Regex;

static NON_IDENTIFIER_CHARS_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_$]+").expect("valid regex"));

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

pub fn property_access_str(obj: &str, prop: &str) -> String {
  if is_validate_identifier_name(prop) {
    format!("{obj}.{prop}")
  } else {
    format!("{obj}[{}]", to_string_literal(prop))
  }
}

pub fn to_module_import_export_name(name: &str) -> String {
  if is_validate_identifier_name(name) { name.into() } else { to_string_literal(name) }
}

/// A double quoted JS string literal for `value`.
pub fn to_string_literal(value: &str) -> String {
  serde_json::Value::String(value.to_string()).to_string()
}

/// Turns an arbitrary name like `lodash.merge` or `@scope/pkg` into something usable as a
/// binding name: `lodash_merge`, `_scope_pkg`.
pub fn legitimize_identifier_name(name: &str) -> String {
  let mut legitimized = NON_IDENTIFIER_CHARS_RE.replace_all(name, "_").into_owned();
  if legitimized.is_empty() || legitimized.starts_with(|c: char| c.is_ascii_digit()) {
    legitimized.insert(0, '_');
  }
  legitimized
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_property_access_str() {
  assert_eq!(property_access_str("$$module.exports", "foo"), "$$module.exports.foo");
  assert_eq!(property_access_str("$$module.exports", "a-b"), "$$module.exports[\"a-b\"]");
}

#[test]
fn test_legitimize_identifier_name() {
  assert_eq!(legitimize_identifier_name("m.js"), "m_js");
  assert_eq!(legitimize_identifier_name("@scope/pkg"), "_scope_pkg");
  assert_eq!(legitimize_identifier_name("3d-utils.mjs"), "_3d_utils_mjs");
  assert_eq!(legitimize_identifier_name(""), "_");
}
