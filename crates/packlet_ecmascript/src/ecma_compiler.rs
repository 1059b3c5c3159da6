use arcstr::ArcStr;
use oxc::{allocator::Allocator, parser::Parser, semantic::SemanticBuilder, span::SourceType};
use packlet_error::{BuildDiagnostic, BuildResult};

use crate::ecma_ast::{
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
  EcmaAst,
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// `.cjs` files are parsed as scripts, everything else as ES modules.
  pub fn source_type_for(path: &str) -> SourceType {
    if path.ends_with(".cjs") {
      SourceType::default()
    } else {
      SourceType::default().with_module(true)
    }
  }

  pub fn parse(
    path: &str,
    source: impl Into<ArcStr>,
    source_type: SourceType,
  ) -> BuildResult<EcmaAst> {
    let allocator = Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() {
        Ok(ProgramCellDependent { program: ret.program })
      } else {
        let messages = ret.errors.iter().map(ToString::to_string).collect();
        Err(BuildDiagnostic::parse_failed(path, messages))
      }
    })?;

    let ast = EcmaAst { program, source_type };

    let semantic_errors =
      SemanticBuilder::new().with_check_syntax_error(true).build(ast.program()).errors;
    if !semantic_errors.is_empty() {
      let messages = semantic_errors.iter().map(ToString::to_string).collect();
      Err(BuildDiagnostic::parse_failed(path, messages))?;
    }

    Ok(ast)
  }
}

#[test]
fn basic_test() {
  let ast =
    EcmaCompiler::parse("main.js", "const a = 1;", SourceType::default().with_module(true))
      .unwrap();
  assert_eq!(ast.program().body.len(), 1);
  assert_eq!(ast.source().as_str(), "const a = 1;");
}

#[test]
fn parse_error_is_reported_with_path() {
  let err = EcmaCompiler::parse("/src/broken.js", "const = ;", EcmaCompiler::source_type_for("a.js"))
    .unwrap_err();
  assert!(err[0].to_string().contains("/src/broken.js"));

  let err = EcmaCompiler::parse(
    "/src/redeclared.js",
    "const a = 1; const a = 2;",
    EcmaCompiler::source_type_for("a.js"),
  )
  .unwrap_err();
  assert!(err[0].to_string().starts_with("Failed to parse \"/src/redeclared.js\""));
}
