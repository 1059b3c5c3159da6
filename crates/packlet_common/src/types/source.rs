use crate::Asset;

pub trait Source {
  fn content(&self) -> &str;
}

impl Source for &str {
  fn content(&self) -> &str {
    self
  }
}

impl Source for String {
  fn content(&self) -> &str {
    self
  }
}

impl Source for &Asset {
  fn content(&self) -> &str {
    &self.content
  }
}
