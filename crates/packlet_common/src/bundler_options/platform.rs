#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  /// Represents the Node.js platform.
  #[default]
  Node,
  Browser,
  Neutral,
}
