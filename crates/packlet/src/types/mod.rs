pub mod bundle_output;

use std::sync::Arc;

use packlet_common::NormalizedBundlerOptions;
use packlet_resolver::Resolver;

pub type SharedResolver = Arc<Resolver>;
pub type SharedOptions = Arc<NormalizedBundlerOptions>;
