use memchr::memchr_iter;

/// 1-based line and column of `offset` inside `source`.
///
/// The column counts bytes from the start of the line, `\r\n` line endings are handled because
/// only the `\n` terminates a line.
pub fn line_and_column(source: &str, offset: usize) -> (u32, u32) {
  let offset = offset.min(source.len());
  let before = &source.as_bytes()[..offset];

  let mut lines = 0usize;
  let mut last_newline = None;
  for idx in memchr_iter(b'\n', before) {
    lines += 1;
    last_newline = Some(idx);
  }

  let line_start = last_newline.map_or(0, |idx| idx + 1);
  let line = u32::try_from(lines + 1).unwrap_or(u32::MAX);
  let column = u32::try_from(offset - line_start + 1).unwrap_or(u32::MAX);
  (line, column)
}

#[test]
fn test_line_and_column() {
  let source = "import a from './a.js';\r\nimport b from './b.js';\nexport default a;";
  assert_eq!(line_and_column(source, 0), (1, 1));
  assert_eq!(line_and_column(source, 7), (1, 8));
  assert_eq!(line_and_column(source, 25), (2, 1));
  assert_eq!(line_and_column(source, 49), (3, 1));
  assert_eq!(line_and_column(source, 10_000), (3, 18));
}
