use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Platform {
  Node,
  Browser,
  Neutral,
}

impl From<Platform> for packlet::Platform {
  fn from(value: Platform) -> Self {
    match value {
      Platform::Node => packlet::Platform::Node,
      Platform::Browser => packlet::Platform::Browser,
      Platform::Neutral => packlet::Platform::Neutral,
    }
  }
}
