use async_trait::async_trait;
use packlet_common::{Asset, LoaderResult, ReferenceMetadata, SourceLocation};
use packlet_ecmascript::{TransformedModule, transform_module};
use packlet_error::BuildResult;

use super::{Loader, LoaderContext, LoaderKind};

/// Rewrites a JS module into a registration call and reports its imports.
pub struct EcmascriptLoader;

#[async_trait]
impl Loader for EcmascriptLoader {
  fn name(&self) -> &'static str {
    "ecmascript"
  }

  fn kind(&self) -> LoaderKind {
    LoaderKind::EmitsReferences
  }

  async fn load(&self, asset: Asset, ctx: &LoaderContext) -> BuildResult<LoaderResult> {
    let module_id = ctx.module_id(&asset.path);
    let TransformedModule { code, imports } =
      transform_module(&asset.path, &asset.content, &module_id, |specifier| {
        ctx.resolve_module_id(specifier, &asset.path)
      })?;

    let locations = imports
      .iter()
      .map(|import| {
        SourceLocation::compute(&asset.content, asset.path.clone(), import.span.start, import.span.end)
      })
      .collect::<Vec<_>>();

    let mut result = LoaderResult::new(asset.with_content(code));
    for (import, location) in imports.into_iter().zip(locations) {
      result.add_path_reference(import.specifier, ReferenceMetadata::new(import.kind, Some(location)));
    }
    Ok(result)
  }
}
