pub mod input_item;
pub mod normalized_bundler_options;
pub mod platform;

use std::path::PathBuf;

use crate::{InputItem, Platform};

#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,
  pub platform: Option<Platform>,

  // --- Output
  pub dir: Option<String>,
  pub file: Option<String>,
}
