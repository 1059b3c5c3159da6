use std::path::Path;

use arcstr::ArcStr;
use packlet_utils::path_ext::PathExt;
use sugar_path::SugarPath;

/// `ModuleId` is the identifier a module is registered under at runtime.
/// - For files it is the path relative to the build root, with `/` separators.
/// - Built-in modules keep their `node:` name.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn from_path(path: &str, cwd: &Path) -> Self {
    if path.starts_with("node:") {
      Self::new(path)
    } else {
      Self::new(path.as_path().relative_slash(cwd))
    }
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

#[test]
fn test_module_id_from_path() {
  let cwd = Path::new("/project");
  assert_eq!(&*ModuleId::from_path("/project/src/m.js", cwd), "src/m.js");
  assert_eq!(&*ModuleId::from_path("node:fs", cwd), "node:fs");
}
