use std::sync::LazyLock;

use async_trait::async_trait;
use packlet_common::{Chunk, ChunkModule, NormalizedBundlerOptions, OutputAsset, SourceJoiner};
use packlet_error::BuildResult;
use packlet_runtime::RUNTIME_SOURCE;

use crate::graph::Graph;

/// Closes every module in an emitted chunk.
pub static MODULE_SEPARATOR: LazyLock<String> =
  LazyLock::new(|| format!("\n/*{}*/\n", "*".repeat(50)));

/// Serializes chunks and writes them out.
#[async_trait]
pub trait Output: Send + Sync {
  fn render(&self, chunks: &[Chunk], graph: &Graph) -> Vec<OutputAsset>;

  /// Writes every asset to `<cwd>/<dir>/<filename>`.
  async fn write(
    &self,
    assets: &[OutputAsset],
    options: &NormalizedBundlerOptions,
  ) -> BuildResult<()> {
    let dir = options.output_dir();
    tokio::fs::create_dir_all(&dir).await?;
    for asset in assets {
      let path = dir.join(asset.filename.as_str());
      tokio::fs::write(&path, &asset.content).await?;
      tracing::debug!("Wrote {}", path.display());
    }
    Ok(())
  }
}

pub struct DefaultOutput;

impl Output for DefaultOutput {
  fn render(&self, chunks: &[Chunk], graph: &Graph) -> Vec<OutputAsset> {
    chunks
      .iter()
      .map(|chunk| {
        let mut joiner = SourceJoiner::with_separator(MODULE_SEPARATOR.as_str());
        for module in &chunk.modules {
          match module {
            ChunkModule::Runtime => joiner.append_source(RUNTIME_SOURCE.as_str()),
            ChunkModule::Asset(idx) => joiner.append_source(graph.asset(*idx)),
          }
        }
        tracing::debug!("Rendered chunk {} with {} modules", chunk.filename, chunk.modules.len());
        OutputAsset { filename: chunk.filename.clone(), content: joiner.join() }
      })
      .collect()
  }
}

#[test]
fn test_render_puts_runtime_first() {
  let mut graph = Graph::default();
  let idx = graph.add_asset(packlet_common::Asset::new("/main.js", "main();"));
  let mut chunk = Chunk::new("dist.js");
  chunk.add_module(ChunkModule::Runtime);
  chunk.add_asset(idx);

  let assets = DefaultOutput.render(&[chunk], &graph);
  let content = &assets[0].content;
  assert!(content.starts_with(RUNTIME_SOURCE.as_str()));
  assert!(content.ends_with(&format!("main();{}", *MODULE_SEPARATOR)));
  assert_eq!(content.matches(MODULE_SEPARATOR.as_str()).count(), 2);
}
