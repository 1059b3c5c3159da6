mod bundler;
mod chunker;
mod graph;
mod loaders;
mod output;
mod types;
mod utils;

use packlet_error::BuildResult;

pub use crate::{
  bundler::Bundler,
  chunker::{Chunker, DefaultChunker},
  graph::{DependencyNode, DependencyTree, Graph},
  loaders::{
    EcmascriptLoader, FileLoader, JsonLoader, Loader, LoaderContext, LoaderKind, LoaderRule,
    SharedLoader,
  },
  output::{DefaultOutput, MODULE_SEPARATOR, Output},
  types::bundle_output::BundleOutput,
};
pub use packlet_common::*;
pub use packlet_error::{BuildDiagnostic, BuildError};

/// Bundles `entry` and everything it references into `<output_dir>/dist.js`, with the default
/// loader table.
pub async fn bundle(
  entry: impl Into<InputItem>,
  output_dir: impl Into<String>,
) -> BuildResult<BundleOutput> {
  let mut bundler = Bundler::new(BundlerOptions {
    input: Some(vec![entry.into()]),
    dir: Some(output_dir.into()),
    ..Default::default()
  })?;
  bundler.add_default_loaders()?;
  bundler.write().await
}
