use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use arcstr::ArcStr;
use dashmap::DashMap;
use itertools::Itertools;
use packlet_common::{ModuleId, Platform};
use packlet_error::{BuildDiagnostic, BuildError, BuildResult};
use packlet_utils::builtin_modules::{is_builtin_module, normalize_builtin_module};
use sugar_path::SugarPath;

use oxc_resolver::{ResolveError, ResolveOptions as OxcResolverOptions, Resolver as OxcResolver};

use crate::package_exports::{self, PackageJsonValue};

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
  inner: OxcResolver,
  package_json_cache: DashMap<PathBuf, PackageJsonValue>,
}

impl Resolver {
  pub fn new(platform: Platform, cwd: PathBuf) -> Self {
    let mut condition_names = vec!["import".to_string(), "default".to_string()];

    match platform {
      Platform::Node => {
        condition_names.push("node".to_string());
      }
      Platform::Browser => {
        condition_names.push("browser".to_string());
      }
      Platform::Neutral => {}
    }

    condition_names = condition_names.into_iter().unique().collect();

    let main_fields = match platform {
      Platform::Node => {
        vec!["main".to_string(), "module".to_string()]
      }
      Platform::Browser => vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      Platform::Neutral => vec!["module".to_string(), "main".to_string()],
    };

    let alias_fields = match platform {
      Platform::Browser => vec![vec!["browser".to_string()]],
      _ => vec![],
    };

    let options = OxcResolverOptions {
      main_fields,
      alias_fields,
      condition_names,
      extensions: [".js", ".mjs", ".cjs", ".json"].into_iter().map(String::from).collect(),
      ..Default::default()
    };

    Self { cwd, inner: OxcResolver::new(options), package_json_cache: DashMap::default() }
  }

  /// Maps `specifier`, as written in a file of `context_dir`, to an absolute path.
  ///
  /// Built-in modules are passed through as `node:<name>`.
  pub fn resolve_absolute(&self, specifier: &str, context_dir: &Path) -> BuildResult<ArcStr> {
    if is_builtin_module(specifier) {
      return Ok(normalize_builtin_module(specifier).into());
    }

    let as_path = Path::new(specifier);
    if as_path.is_absolute() && as_path.is_file() {
      return Ok(specifier.into());
    }

    match self.inner.resolve(context_dir, specifier) {
      Ok(resolution) => Ok(resolution.full_path().to_string_lossy().into()),
      Err(ResolveError::PackagePathNotExported(subpath, package_json_path)) => {
        let resolved = self.resolve_from_package_exports(&subpath, &package_json_path);
        resolved.map(|path| path.to_string_lossy().into()).ok_or_else(|| {
          let err = ResolveError::PackagePathNotExported(subpath, package_json_path);
          BuildError::from(BuildDiagnostic::unresolved_import(
            specifier,
            context_dir.to_string_lossy(),
            err,
          ))
        })
      }
      Err(err) => {
        Err(BuildDiagnostic::unresolved_import(specifier, context_dir.to_string_lossy(), err))?
      }
    }
  }

  /// The runtime module id of `specifier`: its resolved path relative to the build root.
  pub fn resolve_project_relative(
    &self,
    specifier: &str,
    context_dir: &Path,
  ) -> BuildResult<ModuleId> {
    let absolute = self.resolve_absolute(specifier, context_dir)?;
    Ok(ModuleId::from_path(&absolute, &self.cwd))
  }

  /// Resolves a user defined entry. `main.js` is accepted as a shorthand for `./main.js`.
  pub fn resolve_entry(&self, specifier: &str) -> BuildResult<ArcStr> {
    let resolution = self.resolve_absolute(specifier, &self.cwd);

    let is_specifier_path_like = specifier.starts_with('.') || specifier.starts_with('/');
    if resolution.is_err() && !is_specifier_path_like && !is_builtin_module(specifier) {
      let normalized_specifier = self.cwd.join(specifier).normalize();
      if let Ok(resolved) =
        self.resolve_absolute(&normalized_specifier.to_string_lossy(), &self.cwd)
      {
        return Ok(resolved);
      }
    }

    resolution
  }

  /// Fallback for packages whose `exports` map rejected the request: read the manifest ourselves
  /// and take the first string target of the `import`, `require` or `default` conditions.
  fn resolve_from_package_exports(&self, subpath: &str, package_json_path: &Path) -> Option<PathBuf> {
    let package_json_path = if package_json_path.ends_with("package.json") {
      package_json_path.to_path_buf()
    } else {
      package_json_path.join("package.json")
    };

    let package_json = self.cached_package_json(&package_json_path)?;
    let target = package_exports::find_export_target(&package_json, subpath)?;
    let package_dir = package_json_path.parent()?;

    tracing::debug!(
      "{subpath} is not exported by {}, falling back to {target}",
      package_json_path.display()
    );
    Some(package_dir.join(target).normalize())
  }

  fn cached_package_json(&self, package_json_path: &Path) -> Option<PackageJsonValue> {
    if let Some(cached) = self.package_json_cache.get(package_json_path) {
      return Some(Arc::clone(cached.value()));
    }

    let content = std::fs::read_to_string(package_json_path).ok()?;
    let value: PackageJsonValue = Arc::new(serde_json::from_str(&content).ok()?);
    self.package_json_cache.insert(package_json_path.to_path_buf(), Arc::clone(&value));
    Some(value)
  }
}
