use std::path::Path;

use packlet_common::{BundlerOptions, NormalizedBundlerOptions};
use packlet_error::BuildResult;

pub fn normalize_options(raw_options: BundlerOptions) -> BuildResult<NormalizedBundlerOptions> {
  let file = raw_options.file.unwrap_or_else(|| "dist.js".to_string());

  // `--file nested/out.js` without `--dir` writes to `nested/`.
  let dir = raw_options.dir.unwrap_or_else(|| {
    Path::new(file.as_str())
      .parent()
      .map(|parent| parent.to_string_lossy().to_string())
      .filter(|parent| !parent.is_empty())
      .unwrap_or_else(|| "dist".to_string())
  });
  let file = Path::new(file.as_str())
    .file_name()
    .map_or_else(|| file.clone(), |name| name.to_string_lossy().to_string());

  let cwd = match raw_options.cwd {
    Some(cwd) => cwd,
    None => std::env::current_dir()?,
  };

  Ok(NormalizedBundlerOptions {
    input: raw_options.input.unwrap_or_default(),
    cwd,
    platform: raw_options.platform.unwrap_or_default(),
    dir,
    file,
  })
}

#[test]
fn test_defaults() {
  let options = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    ..Default::default()
  })
  .unwrap();
  assert_eq!(options.dir, "dist");
  assert_eq!(options.file, "dist.js");
  assert_eq!(options.platform, packlet_common::Platform::Node);
  assert_eq!(options.output_dir(), Path::new("/project/dist"));
}

#[test]
fn test_file_with_directory() {
  let options = normalize_options(BundlerOptions {
    cwd: Some("/project".into()),
    file: Some("build/app.js".into()),
    ..Default::default()
  })
  .unwrap();
  assert_eq!(options.dir, "build");
  assert_eq!(options.file, "app.js");
}
