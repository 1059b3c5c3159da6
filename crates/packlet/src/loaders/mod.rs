mod ecmascript;
mod file;
mod json;

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use packlet_common::{Asset, LoaderResult, ModuleId};
use packlet_error::BuildResult;
use regex::Regex;

use crate::types::{SharedOptions, SharedResolver};

pub use self::{ecmascript::EcmascriptLoader, file::FileLoader, json::JsonLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
  /// Only rewrites the content, reported references are ignored.
  ContentOnly,
  /// Rewrites the content and reports the references it found.
  EmitsReferences,
}

/// What a loader may use from the running build.
pub struct LoaderContext {
  pub options: SharedOptions,
  pub resolver: SharedResolver,
}

impl LoaderContext {
  /// The id the asset at `path` is registered under at runtime.
  pub fn module_id(&self, path: &str) -> ModuleId {
    ModuleId::from_path(path, &self.options.cwd)
  }

  /// The module id `specifier` resolves to when written in the file at `importer`.
  pub fn resolve_module_id(&self, specifier: &str, importer: &str) -> BuildResult<ModuleId> {
    let context_dir = Path::new(importer).parent().unwrap_or(self.options.cwd.as_path());
    self.resolver.resolve_project_relative(specifier, context_dir)
  }
}

#[async_trait]
pub trait Loader: Send + Sync {
  fn name(&self) -> &'static str;

  fn kind(&self) -> LoaderKind;

  /// Receives the asset produced by the previous loader of the chain.
  async fn load(&self, asset: Asset, ctx: &LoaderContext) -> BuildResult<LoaderResult>;
}

pub type SharedLoader = Arc<dyn Loader>;

/// A loader chain and the paths it applies to.
pub struct LoaderRule {
  pub pattern: Regex,
  pub loaders: Vec<SharedLoader>,
}

impl LoaderRule {
  pub fn new(pattern: Regex, loaders: Vec<SharedLoader>) -> Self {
    Self { pattern, loaders }
  }

  pub fn matches(&self, path: &str) -> bool {
    self.pattern.is_match(path)
  }
}
