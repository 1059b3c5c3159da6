mod ecma_ast;
mod ecma_compiler;
mod module_transform;
mod registration;

pub use crate::{
  ecma_ast::EcmaAst,
  ecma_compiler::EcmaCompiler,
  module_transform::{transform_module, ModuleImport, TransformedModule},
  registration::{render_registration, COMMONJS_PRELUDE},
};
