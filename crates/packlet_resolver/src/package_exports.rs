use std::sync::Arc;

use serde_json::Value;

pub type PackageJsonValue = Arc<Value>;

const CONDITIONS: [&str; 3] = ["import", "require", "default"];

/// Finds the target of `subpath` (e.g. `./feature`) in the `exports` field of a package manifest.
///
/// Supports the string form (`"exports": "./index.js"`), subpath maps and conditional objects,
/// where nested conditions such as `{ "import": { "default": "./x.mjs" } }` are followed.
pub fn find_export_target<'a>(package_json: &'a Value, subpath: &str) -> Option<&'a str> {
  let exports = package_json.get("exports")?;

  match exports {
    Value::String(target) => Some(target.as_str()),
    Value::Object(map) => match map.get(subpath) {
      Some(entry) => pick_conditional_target(entry),
      None => pick_conditional_target(exports),
    },
    _ => None,
  }
}

fn pick_conditional_target(value: &Value) -> Option<&str> {
  match value {
    Value::String(target) => Some(target.as_str()),
    Value::Object(map) => {
      CONDITIONS.iter().find_map(|condition| map.get(*condition).and_then(pick_conditional_target))
    }
    _ => None,
  }
}

#[test]
fn test_find_export_target() {
  let string_form = serde_json::json!({ "exports": "./index.js" });
  assert_eq!(find_export_target(&string_form, "./anything"), Some("./index.js"));

  let subpaths = serde_json::json!({
    "exports": {
      "./feature": { "import": { "default": "./feature.mjs" }, "require": "./feature.cjs" },
      "./plain": "./plain.js",
    }
  });
  assert_eq!(find_export_target(&subpaths, "./feature"), Some("./feature.mjs"));
  assert_eq!(find_export_target(&subpaths, "./plain"), Some("./plain.js"));
  assert_eq!(find_export_target(&subpaths, "./missing"), None);

  let conditional = serde_json::json!({
    "exports": { "require": { "default": "./main.cjs" } }
  });
  assert_eq!(find_export_target(&conditional, "./other"), Some("./main.cjs"));

  let no_exports = serde_json::json!({ "main": "./index.js" });
  assert_eq!(find_export_target(&no_exports, "."), None);
}
