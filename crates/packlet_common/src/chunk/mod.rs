use arcstr::ArcStr;
use packlet_utils::indexmap::FxIndexSet;

use crate::AssetIdx;

/// A member of a chunk. The runtime module manager is not part of the graph, so it has its own
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkModule {
  Runtime,
  Asset(AssetIdx),
}

/// A group of assets that ends up in a single output file.
#[derive(Debug, Default)]
pub struct Chunk {
  pub filename: ArcStr,
  pub modules: FxIndexSet<ChunkModule>,
}

impl Chunk {
  pub fn new(filename: impl Into<ArcStr>) -> Self {
    Self { filename: filename.into(), modules: FxIndexSet::default() }
  }

  /// Adding the same module twice keeps the first position.
  pub fn add_module(&mut self, module: ChunkModule) {
    self.modules.insert(module);
  }

  pub fn add_asset(&mut self, asset_idx: AssetIdx) {
    self.add_module(ChunkModule::Asset(asset_idx));
  }

  pub fn assets(&self) -> impl Iterator<Item = AssetIdx> + '_ {
    self.modules.iter().filter_map(|module| match module {
      ChunkModule::Asset(idx) => Some(*idx),
      ChunkModule::Runtime => None,
    })
  }
}

#[test]
fn test_chunk_keeps_insertion_order() {
  let mut chunk = Chunk::new("dist.js");
  chunk.add_module(ChunkModule::Runtime);
  chunk.add_asset(AssetIdx::from_usize(1));
  chunk.add_asset(AssetIdx::from_usize(0));
  chunk.add_asset(AssetIdx::from_usize(1));
  assert_eq!(chunk.modules.len(), 3);
  assert_eq!(
    chunk.assets().collect::<Vec<_>>(),
    vec![AssetIdx::from_usize(1), AssetIdx::from_usize(0)]
  );
}
