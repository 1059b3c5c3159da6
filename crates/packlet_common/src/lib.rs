mod bundler_options;
mod chunk;
mod types;

pub use bundler_options::{
  input_item::InputItem, normalized_bundler_options::NormalizedBundlerOptions,
  platform::Platform, BundlerOptions,
};

pub use crate::{
  chunk::{Chunk, ChunkModule},
  types::{
    asset::Asset,
    asset_reference::{AssetReference, ReferenceMetadata},
    import_kind::ImportKind,
    loader_result::{LoaderResult, PathReference},
    module_id::ModuleId,
    output_asset::OutputAsset,
    raw_idx::{AssetIdx, ChunkIdx},
    source::Source,
    source_joiner::SourceJoiner,
    source_location::SourceLocation,
  },
};
