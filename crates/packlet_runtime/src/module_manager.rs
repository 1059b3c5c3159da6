use std::{
  future::Future,
  sync::{Arc, LazyLock},
};

use arcstr::ArcStr;
use dashmap::DashMap;
use tokio::sync::watch;

use crate::ModuleExports;

static GLOBAL_MODULE_MANAGER: LazyLock<ModuleManager> = LazyLock::new(ModuleManager::new);

struct PendingModule {
  /// Holds `None` until the registration's factory returned.
  sender: watch::Sender<Option<ModuleExports>>,
  registering: bool,
}

enum ModuleSlot {
  Pending(PendingModule),
  Resolved(ModuleExports),
}

impl ModuleSlot {
  fn pending() -> Self {
    let (sender, _) = watch::channel(None);
    Self::Pending(PendingModule { sender, registering: false })
  }
}

/// What [ModuleManager::get_module_sync] observes, without waiting.
#[derive(Debug, Clone)]
pub enum ModuleEntry {
  Pending,
  Resolved(ModuleExports),
}

impl ModuleEntry {
  pub fn exports(&self) -> Option<&ModuleExports> {
    match self {
      Self::Pending => None,
      Self::Resolved(exports) => Some(exports),
    }
  }
}

#[derive(Debug)]
pub enum RegisterOutcome {
  Registered(ModuleExports),
  /// The id was already resolved or being registered, the existing value is kept.
  AlreadyRegistered,
}

/// The per-module view handed to a registration factory.
pub struct ModuleHandle {
  /// May be replaced wholesale, like `module.exports = ...`.
  pub exports: ModuleExports,
  manager: ModuleManager,
}

impl ModuleHandle {
  pub fn import(&self, id: &str) -> impl Future<Output = ModuleExports> + Send + 'static {
    let manager = self.manager.clone();
    let id = ArcStr::from(id);
    async move { manager.get_module(&id).await }
  }

  pub fn require(&self, id: &str) -> Option<ModuleEntry> {
    self.manager.get_module_sync(id)
  }
}

/// Registry of the modules of one executing bundle.
///
/// A module id is unregistered (no entry), pending (someone waits for it or its registration is
/// running) or resolved (its factory returned and the export object is fixed).
#[derive(Clone, Default)]
pub struct ModuleManager {
  modules: Arc<DashMap<ArcStr, ModuleSlot>>,
}

impl ModuleManager {
  pub fn new() -> Self {
    Self::default()
  }

  /// The process-wide registry. It is created on first access and lives until the process exits.
  pub fn global() -> &'static ModuleManager {
    &GLOBAL_MODULE_MANAGER
  }

  /// Waits until `id` is resolved. A module that never registers keeps its importers waiting.
  pub async fn get_module(&self, id: &str) -> ModuleExports {
    let mut receiver = {
      let slot = self.modules.entry(ArcStr::from(id)).or_insert_with(ModuleSlot::pending);
      match slot.value() {
        ModuleSlot::Resolved(exports) => return exports.clone(),
        ModuleSlot::Pending(pending) => pending.sender.subscribe(),
      }
    };

    let resolved = receiver.wait_for(Option::is_some).await.ok().and_then(|value| (*value).clone());
    match resolved {
      Some(exports) => exports,
      None => futures::future::pending().await,
    }
  }

  /// `require` semantics: whatever is stored right now, possibly a pending placeholder.
  pub fn get_module_sync(&self, id: &str) -> Option<ModuleEntry> {
    self.modules.get(id).map(|slot| match slot.value() {
      ModuleSlot::Pending(_) => ModuleEntry::Pending,
      ModuleSlot::Resolved(exports) => ModuleEntry::Resolved(exports.clone()),
    })
  }

  /// Awaits every dependency in order, runs `factory` with their export objects, then releases
  /// everyone waiting for `id`.
  pub async fn register<F>(&self, id: &str, dependencies: &[&str], factory: F) -> RegisterOutcome
  where
    F: FnOnce(&mut ModuleHandle, Vec<ModuleExports>),
  {
    let is_first_registration = {
      let mut slot = self.modules.entry(ArcStr::from(id)).or_insert_with(ModuleSlot::pending);
      match slot.value_mut() {
        ModuleSlot::Pending(pending) if !pending.registering => {
          pending.registering = true;
          true
        }
        _ => false,
      }
    };
    if !is_first_registration {
      tracing::warn!(module_id = id, "Module already initialized");
      return RegisterOutcome::AlreadyRegistered;
    }

    let mut resolved = Vec::with_capacity(dependencies.len());
    for dependency in dependencies {
      resolved.push(self.get_module(dependency).await);
    }

    let mut handle = ModuleHandle { exports: ModuleExports::new(), manager: self.clone() };
    factory(&mut handle, resolved);
    let exports = handle.exports;
    exports.use_self_as_missing_default();

    let previous = self.modules.insert(ArcStr::from(id), ModuleSlot::Resolved(exports.clone()));
    if let Some(ModuleSlot::Pending(pending)) = previous {
      pending.sender.send_replace(Some(exports.clone()));
    }
    tracing::trace!(module_id = id, "Module registered");

    RegisterOutcome::Registered(exports)
  }

  /// Ids someone waits for that never finished registering, sorted.
  pub fn pending_ids(&self) -> Vec<ArcStr> {
    let mut ids = self
      .modules
      .iter()
      .filter(|entry| matches!(entry.value(), ModuleSlot::Pending(_)))
      .map(|entry| entry.key().clone())
      .collect::<Vec<_>>();
    ids.sort();
    ids
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn registered(outcome: RegisterOutcome) -> ModuleExports {
    match outcome {
      RegisterOutcome::Registered(exports) => exports,
      RegisterOutcome::AlreadyRegistered => panic!("expected a fresh registration"),
    }
  }

  #[tokio::test]
  async fn test_named_import_round_trip() {
    let manager = ModuleManager::new();
    manager
      .register("m.js", &[], |module, _| {
        module.exports.set("a", serde_json::json!(1));
      })
      .await;

    // `import { a as b } from "./m.js"`
    let main = registered(
      manager
        .register("main.js", &["m.js"], |module, deps| {
          let b = deps[0].get("a").unwrap();
          module.exports.set("b", b);
        })
        .await,
    );
    assert_eq!(*main.get("b").unwrap().as_json().unwrap(), 1);
  }

  #[tokio::test]
  async fn test_importer_registered_before_dependency() {
    let manager = ModuleManager::new();
    let main = tokio::spawn({
      let manager = manager.clone();
      async move {
        manager
          .register("main.js", &["dep.js"], |module, deps| {
            module.exports.set("seen", deps[0].get("value").unwrap());
          })
          .await
      }
    });
    tokio::task::yield_now().await;
    assert!(matches!(manager.get_module_sync("dep.js"), Some(ModuleEntry::Pending)));

    manager
      .register("dep.js", &[], |module, _| module.exports.set("value", serde_json::json!("ok")))
      .await;
    let main = registered(main.await.unwrap());
    assert_eq!(*main.get("seen").unwrap().as_json().unwrap(), "ok");
    assert!(manager.pending_ids().is_empty());
  }

  #[tokio::test]
  async fn test_commonjs_exports_are_their_own_default() {
    let manager = ModuleManager::new();
    manager
      .register("lib.cjs", &[], |module, _| {
        let replaced = ModuleExports::new();
        replaced.set("read", serde_json::json!("fn"));
        module.exports = replaced;
      })
      .await;

    let exports = manager.get_module("lib.cjs").await;
    let default = exports.get("default").unwrap();
    assert!(default.as_module().unwrap().ptr_eq(&exports));
    assert!(exports.contains("read"));
  }

  #[tokio::test]
  async fn test_duplicate_registration_keeps_first_value() {
    let manager = ModuleManager::new();
    let first = registered(
      manager.register("a.js", &[], |module, _| module.exports.set("v", serde_json::json!(1))).await,
    );
    let second =
      manager.register("a.js", &[], |module, _| module.exports.set("v", serde_json::json!(2))).await;

    assert!(matches!(second, RegisterOutcome::AlreadyRegistered));
    let current = manager.get_module_sync("a.js").unwrap();
    assert!(current.exports().unwrap().ptr_eq(&first));
    assert_eq!(*first.get("v").unwrap().as_json().unwrap(), 1);
  }

  #[tokio::test]
  async fn test_circular_static_imports_never_resolve() {
    let manager = ModuleManager::new();
    let a = manager.register("a.js", &["b.js"], |module, _| module.exports.set("a", serde_json::json!(1)));
    let b = manager.register("b.js", &["a.js"], |module, _| module.exports.set("b", serde_json::json!(2)));

    let result =
      tokio::time::timeout(std::time::Duration::from_millis(50), futures::future::join(a, b)).await;

    assert!(result.is_err());
    assert_eq!(manager.pending_ids(), vec![ArcStr::from("a.js"), ArcStr::from("b.js")]);
    assert!(manager.get_module_sync("a.js").unwrap().exports().is_none());
  }

  #[tokio::test]
  async fn test_cycle_broken_by_dynamic_import() {
    let manager = ModuleManager::new();
    let (lazy_tx, lazy_rx) = tokio::sync::oneshot::channel();

    let a = manager.register("a.js", &["b.js"], |module, _| module.exports.set("a", serde_json::json!(1)));
    let b = manager.register("b.js", &[], move |module, _| {
      assert!(lazy_tx.send(tokio::spawn(module.import("a.js"))).is_ok());
    });
    futures::future::join(a, b).await;

    let lazy_a = lazy_rx.await.unwrap().await.unwrap();
    assert!(lazy_a.ptr_eq(&manager.get_module("a.js").await));
    assert!(manager.pending_ids().is_empty());
  }

  #[test]
  fn test_global_is_created_once() {
    assert!(Arc::ptr_eq(&ModuleManager::global().modules, &ModuleManager::global().modules));
  }
}
