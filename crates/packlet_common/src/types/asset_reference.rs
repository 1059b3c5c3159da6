use crate::{AssetIdx, ImportKind, SourceLocation};

/// Provenance of one reference edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMetadata {
  pub kind: ImportKind,
  pub location: Option<SourceLocation>,
}

impl ReferenceMetadata {
  pub fn new(kind: ImportKind, location: Option<SourceLocation>) -> Self {
    Self { kind, location }
  }

  pub fn is_dynamic(&self) -> bool {
    self.kind.is_deferred()
  }
}

/// An edge of the asset graph. Several edges may point at the same target, each keeps the
/// metadata of its own call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
  pub target: AssetIdx,
  pub metadata: ReferenceMetadata,
}

impl AssetReference {
  pub fn new(target: AssetIdx, metadata: ReferenceMetadata) -> Self {
    Self { target, metadata }
  }
}
