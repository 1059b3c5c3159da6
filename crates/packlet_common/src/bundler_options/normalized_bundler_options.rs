use std::path::PathBuf;

use crate::{InputItem, Platform};

#[derive(Debug)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  /// The build root, module ids are relative to it.
  pub cwd: PathBuf,
  pub platform: Platform,

  // --- Output
  pub dir: String,
  pub file: String,
}

impl NormalizedBundlerOptions {
  pub fn output_dir(&self) -> PathBuf {
    self.cwd.join(&self.dir)
  }
}
