use std::{path::Path, sync::Arc};

use arcstr::ArcStr;
use futures::{FutureExt, future::BoxFuture};
use packlet_common::{
  Asset, AssetIdx, BundlerOptions, InputItem, LoaderResult, ModuleId, SourceLocation,
};
use packlet_ecmascript::render_registration;
use packlet_error::{BuildDiagnostic, BuildResult};
use packlet_resolver::Resolver;
use packlet_runtime::MODULE_HANDLE;
use packlet_utils::{builtin_modules::is_builtin_module, ecmascript::to_string_literal};
use regex::Regex;

use crate::{
  chunker::{Chunker, DefaultChunker},
  graph::{DependencyTree, Graph},
  loaders::{
    EcmascriptLoader, FileLoader, JsonLoader, LoaderContext, LoaderKind, LoaderRule, SharedLoader,
  },
  output::{DefaultOutput, Output},
  types::{SharedOptions, SharedResolver, bundle_output::BundleOutput},
  utils::{
    load_source::{LoadedSource, load_source},
    normalize_options::normalize_options,
  },
};

pub struct Bundler {
  pub(crate) options: SharedOptions,
  pub(crate) resolver: SharedResolver,
  loader_rules: Vec<LoaderRule>,
  chunker: Box<dyn Chunker>,
  output: Box<dyn Output>,
  graph: Graph,
  warnings: Vec<anyhow::Error>,
}

impl Bundler {
  /// A bundler without loaders, see [Bundler::add_loaders] and [Bundler::add_default_loaders].
  pub fn new(options: BundlerOptions) -> BuildResult<Self> {
    let options = normalize_options(options)?;
    let resolver: SharedResolver = Resolver::new(options.platform, options.cwd.clone()).into();

    Ok(Bundler {
      options: Arc::new(options),
      resolver,
      loader_rules: Vec::new(),
      chunker: Box::new(DefaultChunker),
      output: Box::new(DefaultOutput),
      graph: Graph::default(),
      warnings: Vec::new(),
    })
  }

  /// Appends a loader chain for paths matching `pattern`. Rules are tried in the order they were
  /// added and the first match wins.
  pub fn add_loaders(&mut self, pattern: &str, loaders: Vec<SharedLoader>) -> BuildResult<()> {
    let pattern = Regex::new(pattern).map_err(anyhow::Error::from)?;
    self.loader_rules.push(LoaderRule::new(pattern, loaders));
    Ok(())
  }

  /// Data files, JS modules, then style sheets, images and fonts.
  pub fn add_default_loaders(&mut self) -> BuildResult<()> {
    self.add_loaders(r"(?i)\.json$", vec![Arc::new(JsonLoader)])?;
    self.add_loaders(r"\.[cm]?js$", vec![Arc::new(EcmascriptLoader)])?;
    self.add_loaders(
      r"(?i)\.(css|svg|png|jpeg|gif|woff|woff2|ttf|otf|less|sass|scss)$",
      vec![Arc::new(FileLoader)],
    )?;
    Ok(())
  }

  pub fn set_chunker(&mut self, chunker: impl Chunker + 'static) {
    self.chunker = Box::new(chunker);
  }

  pub fn set_output(&mut self, output: impl Output + 'static) {
    self.output = Box::new(output);
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  pub fn dependency_tree(&self) -> DependencyTree {
    self.graph.compute_dependency_tree(None)
  }

  /// Discovers the whole graph below the configured inputs.
  pub async fn scan(&mut self) -> BuildResult<()> {
    if self.options.input.is_empty() {
      Err(anyhow::anyhow!("You must supply options.input to packlet"))?;
    }

    self.graph = Graph::default();
    self.warnings.clear();

    let inputs = self.options.input.clone();
    for InputItem { import, .. } in inputs {
      let path = self.resolver.resolve_entry(&import)?;
      let idx = self.process_path(path, None).await?;
      self.graph.add_entry(idx);
    }
    Ok(())
  }

  /// Builds and renders the chunks without writing them.
  pub async fn generate(&mut self) -> BuildResult<BundleOutput> {
    self.build(false).await
  }

  /// Builds, renders and writes the chunks to the output directory.
  pub async fn write(&mut self) -> BuildResult<BundleOutput> {
    self.build(true).await
  }

  async fn build(&mut self, is_write: bool) -> BuildResult<BundleOutput> {
    self.scan().await?;

    let chunks = self.chunker.chunk(&self.graph, &self.options);
    let assets = self.output.render(&chunks, &self.graph);
    if is_write {
      self.output.write(&assets, &self.options).await?;
    }

    Ok(BundleOutput { assets, warnings: std::mem::take(&mut self.warnings) })
  }

  /// Returns the asset at `path`, running its loader chain and discovering everything it
  /// references first. A path enters the loader chain at most once.
  pub fn process_path(
    &mut self,
    path: ArcStr,
    requested_from: Option<SourceLocation>,
  ) -> BoxFuture<'_, BuildResult<AssetIdx>> {
    async move {
      if let Some(idx) = self.graph.asset_idx(&path) {
        tracing::trace!("Already discovered {path}");
        return Ok(idx);
      }

      if is_builtin_module(&path) {
        tracing::trace!("Synthesizing built-in module {path}");
        return Ok(self.graph.add_asset(Self::builtin_asset(path)));
      }

      let Some(rule) = self.loader_rules.iter().find(|rule| rule.matches(&path)) else {
        let requested_from = requested_from.as_ref().map(ToString::to_string);
        return Err(BuildDiagnostic::no_loader(path.as_str(), requested_from).into());
      };
      let loaders = rule.loaders.clone();
      tracing::debug!(
        "Loading {path} with [{}]",
        loaders.iter().map(|loader| loader.name()).collect::<Vec<_>>().join(", ")
      );

      let LoadedSource { content, is_lossy } = load_source(&path).await?;
      if is_lossy {
        self.warnings.push(anyhow::anyhow!("\"{path}\" is not valid UTF-8, it was decoded lossily"));
      }

      // Registered before its references are followed, so cycles end at the dedup check above.
      let idx = self.graph.add_asset(Asset::new(path.clone(), content));
      let context = LoaderContext {
        options: Arc::clone(&self.options),
        resolver: Arc::clone(&self.resolver),
      };
      let context_dir =
        Path::new(path.as_str()).parent().unwrap_or(self.options.cwd.as_path()).to_path_buf();

      let mut asset = self.graph.asset(idx).clone();
      for loader in loaders {
        let LoaderResult { asset: loaded, references } = loader.load(asset, &context).await?;
        self.graph.update_content(idx, loaded.content.clone());
        asset = loaded;

        if loader.kind() == LoaderKind::ContentOnly {
          continue;
        }
        for reference in references {
          let target_path = self.resolver.resolve_absolute(&reference.specifier, &context_dir)?;
          let target = self.process_path(target_path, reference.metadata.location.clone()).await?;
          tracing::trace!("{path} -> {} ({})", self.graph.asset(target).path, reference.metadata.kind);
          self.graph.add_asset_reference(idx, target, reference.metadata);
        }
      }

      Ok(idx)
    }
    .boxed()
  }

  /// `fs` and `node:fs` both end up as the asset `node:fs`, re-exporting the host module.
  fn builtin_asset(path: ArcStr) -> Asset {
    let module_id = ModuleId::new(path.clone());
    let body = format!("{MODULE_HANDLE}.exports = require({});", to_string_literal(&path));
    Asset::new(path, render_registration(&module_id, &[], &[], &body))
  }
}
