use oxc::span::Span;

/// Replace `span` of the original text with `replacement`.
#[derive(Debug)]
pub struct Edit {
  pub span: Span,
  pub replacement: String,
}

impl Edit {
  pub fn new(span: Span, replacement: impl Into<String>) -> Self {
    Self { span, replacement: replacement.into() }
  }

  /// Moves the edit into a slice of the original text that starts at `base`.
  pub fn rebased(self, base: u32) -> Self {
    Self { span: Span::new(self.span.start - base, self.span.end - base), ..self }
  }
}

/// Applies non-overlapping `edits` to `source` in place.
///
/// Edits are applied from the earliest start on. Every splice shifts all later positions by the
/// length difference it introduced, the shift is carried forward in one accumulator instead of
/// rewriting the remaining edits.
pub fn splice(source: &str, mut edits: Vec<Edit>) -> String {
  edits.sort_by_key(|edit| edit.span.start);

  let mut output = source.to_string();
  let mut offset = 0isize;
  for edit in edits {
    let start = (edit.span.start as usize).saturating_add_signed(offset);
    let end = (edit.span.end as usize).saturating_add_signed(offset);
    output.replace_range(start..end, &edit.replacement);
    offset += signed_len(edit.replacement.len()) - signed_len(edit.span.size() as usize);
  }
  output
}

// No allocation is larger than `isize::MAX` bytes.
#[allow(clippy::cast_possible_wrap)]
fn signed_len(len: usize) -> isize {
  len as isize
}

#[test]
fn test_splice_shifts_later_edits() {
  let source = "aaa bbb ccc";
  let edits = vec![
    Edit::new(Span::new(8, 11), "C"),
    Edit::new(Span::new(0, 3), "AAAAAA"),
    Edit::new(Span::new(4, 7), ""),
  ];
  assert_eq!(splice(source, edits), "AAAAAA  C");
}

#[test]
fn test_rebased_edit() {
  let source = "const a = require('./a.js');";
  let value = Span::new(10, 27);
  let edit = Edit::new(Span::new(10, 27), "$$module.require(\"a.js\")").rebased(value.start);
  assert_eq!(splice(&source[10..27], vec![edit]), "$$module.require(\"a.js\")");
}
