use std::path::PathBuf;

use clap::Args;

use crate::types::platform::Platform;

#[derive(Args)]
pub struct InputArgs {
  /// Build root, module ids are relative to it. Defaults to the current directory.
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub input: Option<Vec<PathBuf>>,

  #[clap(long, short)]
  pub platform: Option<Platform>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub dir: Option<String>,

  #[clap(long, short = 'o')]
  pub file: Option<String>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  /// Print the dependency tree of every entry with asset sizes.
  #[clap(long)]
  pub tree: bool,

  #[clap(long, short = 's')]
  pub silent: bool,
}
