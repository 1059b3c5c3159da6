use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber once. Output is controlled by `RUST_LOG`, e.g.
/// `RUST_LOG=packlet=trace`.
pub fn init() {
  use tracing_subscriber::{EnvFilter, fmt, prelude::*};
  if !IS_INIT.swap(true, Ordering::SeqCst) {
    tracing_subscriber::registry()
      .with(fmt::layer().with_writer(std::io::stderr))
      .with(EnvFilter::from_default_env())
      .with(tracing_subscriber::filter::Targets::new().with_targets(vec![("packlet", Level::TRACE)]))
      .init();
  }
}
