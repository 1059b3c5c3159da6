use async_trait::async_trait;
use packlet_common::{Asset, LoaderResult};
use packlet_ecmascript::render_registration;
use packlet_error::{BuildDiagnostic, BuildResult};
use packlet_runtime::MODULE_HANDLE;

use super::{Loader, LoaderContext, LoaderKind};

/// Registers a JSON document as the export object of its module.
pub struct JsonLoader;

#[async_trait]
impl Loader for JsonLoader {
  fn name(&self) -> &'static str {
    "json"
  }

  fn kind(&self) -> LoaderKind {
    LoaderKind::ContentOnly
  }

  async fn load(&self, asset: Asset, ctx: &LoaderContext) -> BuildResult<LoaderResult> {
    if let Err(err) = serde_json::from_str::<serde_json::Value>(&asset.content) {
      Err(BuildDiagnostic::invalid_json(asset.path.as_str(), err))?;
    }

    let module_id = ctx.module_id(&asset.path);
    let body = format!("{MODULE_HANDLE}.exports = {};", asset.content.trim());
    let code = render_registration(&module_id, &[], &[], &body);
    Ok(LoaderResult::new(asset.with_content(code)))
  }
}
