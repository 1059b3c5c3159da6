use async_trait::async_trait;
use packlet_common::{Asset, LoaderResult};
use packlet_ecmascript::render_registration;
use packlet_error::BuildResult;
use packlet_runtime::MODULE_HANDLE;
use packlet_utils::ecmascript::to_string_literal;

use super::{Loader, LoaderContext, LoaderKind};

/// Style sheets, images and fonts: the file content becomes the default export, as a string.
pub struct FileLoader;

#[async_trait]
impl Loader for FileLoader {
  fn name(&self) -> &'static str {
    "file"
  }

  fn kind(&self) -> LoaderKind {
    LoaderKind::ContentOnly
  }

  async fn load(&self, asset: Asset, ctx: &LoaderContext) -> BuildResult<LoaderResult> {
    let module_id = ctx.module_id(&asset.path);
    let body = format!("{MODULE_HANDLE}.exports.default = {};", to_string_literal(&asset.content));
    let code = render_registration(&module_id, &[], &[], &body);
    Ok(LoaderResult::new(asset.with_content(code)))
  }
}
