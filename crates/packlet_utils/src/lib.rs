pub mod builtin_modules;
pub mod ecmascript;
pub mod indexmap;
pub mod lines_count;
pub mod path_ext;
