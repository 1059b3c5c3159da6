use std::fmt::Display;

use arcstr::ArcStr;
use packlet_utils::lines_count::line_and_column;

/// Where a reference was written: 1-based `line`/`column` plus the byte range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
  pub path: ArcStr,
  pub line: u32,
  pub column: u32,
  pub start: u32,
  pub end: u32,
}

impl SourceLocation {
  pub fn compute(source: &str, path: impl Into<ArcStr>, start: u32, end: u32) -> Self {
    let (line, column) = line_and_column(source, start as usize);
    Self { path: path.into(), line, column, start, end }
  }
}

impl Display for SourceLocation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}:{}", self.path, self.line, self.column)
  }
}

#[test]
fn test_compute_source_location() {
  let source = "const a = 1;\nconst b = import('./b.js');\n";
  let location = SourceLocation::compute(source, "/project/main.js", 23, 39);
  assert_eq!(location.line, 2);
  assert_eq!(location.column, 11);
  assert_eq!(location.to_string(), "/project/main.js:2:11");
}
