use std::sync::Arc;

use arcstr::ArcStr;
use packlet_utils::indexmap::FxIndexMap;
use parking_lot::RwLock;

#[derive(Debug, Clone)]
pub enum ExportValue {
  Json(serde_json::Value),
  /// Another module's export object, e.g. a re-exported namespace.
  Module(ModuleExports),
}

impl ExportValue {
  pub fn as_json(&self) -> Option<&serde_json::Value> {
    match self {
      Self::Json(value) => Some(value),
      Self::Module(_) => None,
    }
  }

  pub fn as_module(&self) -> Option<&ModuleExports> {
    match self {
      Self::Module(exports) => Some(exports),
      Self::Json(_) => None,
    }
  }
}

impl From<serde_json::Value> for ExportValue {
  fn from(value: serde_json::Value) -> Self {
    Self::Json(value)
  }
}

impl From<ModuleExports> for ExportValue {
  fn from(exports: ModuleExports) -> Self {
    Self::Module(exports)
  }
}

#[derive(Debug, Default)]
struct ExportsInner {
  values: FxIndexMap<ArcStr, ExportValue>,
  /// Set once the owning module finished without a `default` export.
  default_is_self: bool,
}

/// A module's export object. Clones share the same object, like JS object references.
#[derive(Debug, Clone, Default)]
pub struct ModuleExports(Arc<RwLock<ExportsInner>>);

impl ModuleExports {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<ExportValue> {
    let inner = self.0.read();
    match inner.values.get(name) {
      Some(value) => Some(value.clone()),
      None if name == "default" && inner.default_is_self => Some(ExportValue::Module(self.clone())),
      None => None,
    }
  }

  pub fn set(&self, name: impl Into<ArcStr>, value: impl Into<ExportValue>) {
    self.0.write().values.insert(name.into(), value.into());
  }

  pub fn contains(&self, name: &str) -> bool {
    self.get(name).is_some()
  }

  /// Own export names in insertion order, the implicit `default` is not listed.
  pub fn names(&self) -> Vec<ArcStr> {
    self.0.read().values.keys().cloned().collect()
  }

  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  /// Lets `default` imports of CommonJS-shaped modules see the whole object.
  pub(crate) fn use_self_as_missing_default(&self) {
    let mut inner = self.0.write();
    if !inner.values.contains_key("default") {
      inner.default_is_self = true;
    }
  }
}

#[test]
fn test_default_falls_back_to_self() {
  let exports = ModuleExports::new();
  exports.set("answer", serde_json::json!(42));
  assert!(exports.get("default").is_none());

  exports.use_self_as_missing_default();
  let default = exports.get("default").unwrap();
  assert!(default.as_module().unwrap().ptr_eq(&exports));
  assert_eq!(exports.names(), vec![ArcStr::from("answer")]);

  let explicit = ModuleExports::new();
  explicit.set("default", serde_json::json!("value"));
  explicit.use_self_as_missing_default();
  assert_eq!(*explicit.get("default").unwrap().as_json().unwrap(), "value");
}
