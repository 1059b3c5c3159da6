use std::fmt::Display;

/// Fatal problems found while discovering the asset graph.
///
/// Every variant aborts the whole build, a partial graph is never written.
#[derive(Debug)]
pub enum BuildDiagnostic {
  UnresolvedImport {
    specifier: String,
    context_dir: String,
    reason: String,
  },
  NoLoader {
    path: String,
    /// `path:line:column` of the statement that referenced `path`.
    requested_from: Option<String>,
  },
  ParseFailed {
    path: String,
    messages: Vec<String>,
  },
  UnsupportedSyntax {
    path: String,
    location: String,
    description: &'static str,
  },
  InvalidJson {
    path: String,
    reason: String,
  },
}

impl BuildDiagnostic {
  pub fn unresolved_import(
    specifier: impl Into<String>,
    context_dir: impl Into<String>,
    reason: impl Display,
  ) -> Self {
    Self::UnresolvedImport {
      specifier: specifier.into(),
      context_dir: context_dir.into(),
      reason: reason.to_string(),
    }
  }

  pub fn no_loader(path: impl Into<String>, requested_from: Option<String>) -> Self {
    Self::NoLoader { path: path.into(), requested_from }
  }

  pub fn parse_failed(path: impl Into<String>, messages: Vec<String>) -> Self {
    Self::ParseFailed { path: path.into(), messages }
  }

  pub fn unsupported_syntax(
    path: impl Into<String>,
    location: impl Into<String>,
    description: &'static str,
  ) -> Self {
    Self::UnsupportedSyntax { path: path.into(), location: location.into(), description }
  }

  pub fn invalid_json(path: impl Into<String>, reason: impl Display) -> Self {
    Self::InvalidJson { path: path.into(), reason: reason.to_string() }
  }
}

impl Display for BuildDiagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::UnresolvedImport { specifier, context_dir, reason } => {
        write!(f, "Could not resolve \"{specifier}\" from \"{context_dir}\": {reason}")
      }
      Self::NoLoader { path, requested_from: Some(location) } => {
        write!(f, "No loader matches asset \"{path}\" (requested from {location})")
      }
      Self::NoLoader { path, requested_from: None } => {
        write!(f, "No loader matches asset \"{path}\"")
      }
      Self::ParseFailed { path, messages } => {
        write!(f, "Failed to parse \"{path}\": {}", messages.join("; "))
      }
      Self::UnsupportedSyntax { path, location, description } => {
        write!(f, "Unsupported syntax in \"{path}\" at {location}: {description}")
      }
      Self::InvalidJson { path, reason } => write!(f, "Invalid JSON in \"{path}\": {reason}"),
    }
  }
}

impl std::error::Error for BuildDiagnostic {}

#[test]
fn test_no_loader_message() {
  let diagnostic =
    BuildDiagnostic::no_loader("/project/src/logo.xyz", Some("/project/src/main.js:3:1".into()));
  assert_eq!(
    diagnostic.to_string(),
    "No loader matches asset \"/project/src/logo.xyz\" (requested from /project/src/main.js:3:1)"
  );
}
