pub mod asset;
pub mod asset_reference;
pub mod import_kind;
pub mod loader_result;
pub mod module_id;
pub mod output_asset;
pub mod raw_idx;
pub mod source;
pub mod source_joiner;
pub mod source_location;
