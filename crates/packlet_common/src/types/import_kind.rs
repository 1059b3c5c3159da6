use std::fmt::Display;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ImportKind {
  /// import foo from 'foo'
  Import,
  /// `import('foo')`
  DynamicImport,
  /// `require('foo')`
  Require,
}

impl ImportKind {
  pub fn is_static(self) -> bool {
    matches!(self, Self::Import)
  }

  /// Deferred references are resolved lazily by the runtime, everything else is awaited before
  /// the importing module runs.
  pub fn is_deferred(self) -> bool {
    matches!(self, Self::DynamicImport)
  }
}

impl Display for ImportKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Import => write!(f, "import-statement"),
      Self::DynamicImport => write!(f, "dynamic-import"),
      Self::Require => write!(f, "require-call"),
    }
  }
}
