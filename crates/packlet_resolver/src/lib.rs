// An wrapper around the `oxc_resolver` crate to provide a more packlet-specific API.

mod package_exports;
mod resolver;

pub use crate::resolver::Resolver;

pub use oxc_resolver::ResolveError;
