mod build_diagnostic;

use std::ops::{Deref, DerefMut};

pub use crate::build_diagnostic::BuildDiagnostic;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  pub fn into_vec(self) -> Vec<anyhow::Error> {
    self.0
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, error) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<BuildDiagnostic> for BuildError {
  fn from(diagnostic: BuildDiagnostic) -> Self {
    Self(vec![diagnostic.into()])
  }
}

impl From<Vec<BuildDiagnostic>> for BuildError {
  fn from(diagnostics: Vec<BuildDiagnostic>) -> Self {
    Self(diagnostics.into_iter().map(anyhow::Error::from).collect())
  }
}

impl From<std::io::Error> for BuildError {
  fn from(error: std::io::Error) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_build_error_display() {
  let error = BuildError::from(vec![anyhow::anyhow!("first"), anyhow::anyhow!("second")]);
  assert_eq!(error.len(), 2);
  assert_eq!(error.to_string(), "first\nsecond");
}
