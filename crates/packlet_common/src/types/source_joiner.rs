use super::source::Source;

#[derive(Default)]
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + Send + 'source>>,
  prepend_source: Vec<Box<dyn Source + Send + 'source>>,
  separator: Option<&'source str>,
}

impl<'source> SourceJoiner<'source> {
  /// Every source is followed by `separator` instead of a plain `\n`.
  pub fn with_separator(separator: &'source str) -> Self {
    Self { separator: Some(separator), ..Self::default() }
  }

  pub fn append_source<T: Source + Send + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  pub fn prepend_source(&mut self, source: Box<dyn Source + Send + 'source>) {
    self.prepend_source.push(source);
  }

  pub fn join(&self) -> String {
    let sources_len = self.prepend_source.len() + self.inner.len();
    if sources_len == 0 {
      return String::new();
    }
    let sources_iter = self.prepend_source.iter().chain(self.inner.iter()).enumerate();

    let size_hint_of_ret_source: usize = match self.separator {
      Some(separator) => {
        sources_iter.clone().map(|(_idx, source)| source.content().len() + separator.len()).sum()
      }
      None => sources_iter.clone().map(|(_idx, source)| source.content().len()).sum::<usize>()
        + /* Each source we will emit a '\n' but exclude last one */ (sources_len - 1),
    };
    let mut ret_source = String::with_capacity(size_hint_of_ret_source);

    for (index, source) in sources_iter {
      ret_source.push_str(source.content());
      match self.separator {
        Some(separator) => ret_source.push_str(separator),
        None if index < sources_len - 1 => ret_source.push('\n'),
        None => {}
      }
    }

    ret_source
  }
}

#[test]
fn test_join_with_separator() {
  let mut joiner = SourceJoiner::with_separator("\n/**/\n");
  joiner.append_source("a();");
  joiner.append_source("b();".to_string());
  joiner.prepend_source(Box::new("runtime();"));
  assert_eq!(joiner.join(), "runtime();\n/**/\na();\n/**/\nb();\n/**/\n");

  let mut joiner = SourceJoiner::default();
  joiner.append_source("a();");
  joiner.append_source("b();");
  assert_eq!(joiner.join(), "a();\nb();");
}
