use packlet_common::{Chunk, ChunkModule, NormalizedBundlerOptions};

use crate::graph::Graph;

/// Partitions the discovered graph into output chunks.
pub trait Chunker: Send + Sync {
  fn chunk(&self, graph: &Graph, options: &NormalizedBundlerOptions) -> Vec<Chunk>;
}

/// A single chunk named after `options.file` holding the runtime and every asset.
pub struct DefaultChunker;

impl Chunker for DefaultChunker {
  fn chunk(&self, graph: &Graph, options: &NormalizedBundlerOptions) -> Vec<Chunk> {
    let mut chunk = Chunk::new(options.file.as_str());
    chunk.add_module(ChunkModule::Runtime);
    for (idx, _) in graph.assets() {
      chunk.add_asset(idx);
    }
    vec![chunk]
  }
}
