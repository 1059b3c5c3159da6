use packlet_runtime::{MODULE_HANDLE, REGISTER_FN};
use packlet_utils::ecmascript::to_string_literal;

/// Gives CommonJS code its usual `module` and `exports` bindings inside a registration factory.
pub const COMMONJS_PRELUDE: &str = "const module = $$module, exports = $$module.exports;";

/// Renders one registration call of the runtime protocol:
///
/// ```js
/// $$register("src/main.js", ["src/dep.js"], function($$module, dep_0) {
/// ...body...
/// });
/// ```
///
/// `parameters` bind positionally to the first `dependencies`, the remaining dependencies are
/// only awaited.
pub fn render_registration(
  module_id: &str,
  dependencies: &[&str],
  parameters: &[&str],
  body: &str,
) -> String {
  debug_assert!(parameters.len() <= dependencies.len());

  let dependencies =
    dependencies.iter().map(|dependency| to_string_literal(dependency)).collect::<Vec<_>>();
  let parameters = std::iter::once(MODULE_HANDLE).chain(parameters.iter().copied());

  format!(
    "{REGISTER_FN}({}, [{}], function({}) {{\n{body}\n}});",
    to_string_literal(module_id),
    dependencies.join(", "),
    parameters.collect::<Vec<_>>().join(", "),
  )
}

#[test]
fn test_render_registration() {
  let code = render_registration(
    "src/main.js",
    &["src/a.js", "src/b.cjs"],
    &["a_0"],
    "console.log(a_0);",
  );
  assert_eq!(
    code,
    "$$register(\"src/main.js\", [\"src/a.js\", \"src/b.cjs\"], function($$module, a_0) {\nconsole.log(a_0);\n});"
  );
}
