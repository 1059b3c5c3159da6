use arcstr::ArcStr;

use crate::{Asset, ReferenceMetadata};

/// A dependency exactly as written in the source, resolving it is the bundler's job.
#[derive(Debug, Clone)]
pub struct PathReference {
  pub specifier: ArcStr,
  pub metadata: ReferenceMetadata,
}

impl PathReference {
  pub fn new(specifier: impl Into<ArcStr>, metadata: ReferenceMetadata) -> Self {
    Self { specifier: specifier.into(), metadata }
  }
}

#[derive(Debug)]
pub struct LoaderResult {
  pub asset: Asset,
  pub references: Vec<PathReference>,
}

impl LoaderResult {
  pub fn new(asset: Asset) -> Self {
    Self { asset, references: Vec::new() }
  }

  pub fn add_path_reference(&mut self, specifier: impl Into<ArcStr>, metadata: ReferenceMetadata) {
    self.references.push(PathReference::new(specifier, metadata));
  }
}
