//! The module registration protocol shared by emitted bundles.
//!
//! Every transformed module is emitted as
//! `$$register(id, dependencies, function($$module, ...dependencyExports) { ... })`
//! and the runtime below resolves those calls while the bundle executes.
//! [ModuleManager] models the same registry for hosts that drive registrations from Rust.

mod module_exports;
mod module_manager;

use arcstr::ArcStr;

pub use crate::{
  module_exports::{ExportValue, ModuleExports},
  module_manager::{ModuleEntry, ModuleHandle, ModuleManager, RegisterOutcome},
};

/// Name of the registration function emitted code calls.
pub const REGISTER_FN: &str = "$$register";

/// Name of the per-module handle parameter exposing `exports`, `import` and `require`.
pub const MODULE_HANDLE: &str = "$$module";

/// The runtime module manager, prepended once to every bundle.
pub static RUNTIME_SOURCE: ArcStr = arcstr::literal!(include_str!("./runtime/module-manager.js"));

#[test]
fn test_runtime_source_defines_protocol() {
  assert!(RUNTIME_SOURCE.contains(&format!("const {REGISTER_FN} = ")));
  assert!(RUNTIME_SOURCE.contains(&format!("const {MODULE_HANDLE} = {{")));
}
