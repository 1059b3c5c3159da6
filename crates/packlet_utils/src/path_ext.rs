use std::{borrow::Cow, path::Path};

use sugar_path::SugarPath;

pub trait PathExt {
  fn to_slash_string(&self) -> String;

  fn representative_file_name(&self) -> Cow<str>;

  /// `self` relative to `root`, with `/` separators on every platform.
  fn relative_slash(&self, root: &Path) -> String;
}

impl PathExt for Path {
  fn to_slash_string(&self) -> String {
    self.to_slash_lossy().into_owned()
  }

  /// The file name without extension, e.g. `m` for `./lib/m.js`.
  ///
  /// It doesn't ensure the file name is a valid identifier in JS.
  fn representative_file_name(&self) -> Cow<str> {
    self.file_stem().map_or_else(|| self.to_string_lossy(), |stem| stem.to_string_lossy())
  }

  fn relative_slash(&self, root: &Path) -> String {
    if self.is_absolute() {
      self.relative(root).as_path().to_slash_lossy().into_owned()
    } else {
      self.to_slash_string()
    }
  }
}

#[test]
fn test_representative_file_name() {
  let cwd = Path::new(".").join("project");
  let path = cwd.join("src").join("vue.js");
  assert_eq!(path.representative_file_name(), "vue");

  let path = cwd.join("src").join("data.json");
  assert_eq!(path.representative_file_name(), "data");
}

#[test]
fn test_relative_slash() {
  let root = Path::new("/project");
  assert_eq!(Path::new("/project/src/main.js").relative_slash(root), "src/main.js");
  assert_eq!(Path::new("/other/lib.js").relative_slash(root), "../other/lib.js");
  assert_eq!(Path::new("src/main.js").relative_slash(root), "src/main.js");
}
