use arcstr::ArcStr;

/// One discovered source document.
///
/// `path` is the absolute, resolver-normalized identity and never changes. `content` is replaced
/// by every loader of the chain, each loader receives the asset the previous one produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
  pub path: ArcStr,
  pub content: String,
}

impl Asset {
  pub fn new(path: impl Into<ArcStr>, content: impl Into<String>) -> Self {
    Self { path: path.into(), content: content.into() }
  }

  #[must_use]
  pub fn with_content(mut self, content: impl Into<String>) -> Self {
    self.content = content.into();
    self
  }

  pub fn size(&self) -> usize {
    self.content.len()
  }
}
