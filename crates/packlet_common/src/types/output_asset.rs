use arcstr::ArcStr;

/// A rendered chunk, ready to be written.
#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: ArcStr,
  pub content: String,
}
