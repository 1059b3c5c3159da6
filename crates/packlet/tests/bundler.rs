use std::path::PathBuf;

use packlet::{
  AssetIdx, BuildError, Bundler, BundlerOptions, Graph, ImportKind, MODULE_SEPARATOR,
};

fn fixture(name: &str) -> PathBuf {
  let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
  std::fs::canonicalize(path).unwrap()
}

fn bundler_for(name: &str, entry: &str) -> Bundler {
  let mut bundler = Bundler::new(BundlerOptions {
    input: Some(vec![entry.into()]),
    cwd: Some(fixture(name)),
    ..Default::default()
  })
  .unwrap();
  bundler.add_default_loaders().unwrap();
  bundler
}

async fn scan(name: &str, entry: &str) -> Bundler {
  let mut bundler = bundler_for(name, entry);
  bundler.scan().await.unwrap();
  bundler
}

async fn scan_err(name: &str, entry: &str) -> BuildError {
  bundler_for(name, entry).scan().await.unwrap_err()
}

fn find(graph: &Graph, file_name: &str) -> AssetIdx {
  graph
    .assets()
    .find(|(_, asset)| asset.path.ends_with(&format!("/{file_name}")) || asset.path.as_str() == file_name)
    .map(|(idx, _)| idx)
    .unwrap()
}

fn edges_into(graph: &Graph, target: AssetIdx) -> usize {
  graph
    .assets()
    .flat_map(|(idx, _)| graph.references(idx))
    .filter(|reference| reference.target == target)
    .count()
}

#[tokio::test]
async fn diamond_discovers_shared_dependency_once() {
  let bundler = scan("diamond", "./main.js").await;
  let graph = bundler.graph();

  assert_eq!(graph.len(), 4);
  let d = find(graph, "d.js");
  assert_eq!(edges_into(graph, d), 2);

  let main = find(graph, "main.js");
  assert_eq!(graph.entries().collect::<Vec<_>>(), vec![main]);
  let targets =
    graph.references(main).iter().map(|reference| reference.target).collect::<Vec<_>>();
  assert_eq!(targets, vec![find(graph, "b.js"), find(graph, "c.js")]);
}

#[tokio::test]
async fn cyclic_references_terminate() {
  let bundler = scan("cycle", "./a.js").await;
  let graph = bundler.graph();

  assert_eq!(graph.len(), 2);
  let a = find(graph, "a.js");
  assert_eq!(edges_into(graph, a), 1);

  let tree = bundler.dependency_tree();
  let root = tree.values().next().unwrap();
  assert_eq!(root.references.len(), 1);
  let b = root.references.values().next().unwrap();
  assert!(b.references.is_empty());
  assert_eq!(root.subtree_size, b.size);
}

#[tokio::test]
async fn missing_loader_reports_path_and_location() {
  let err = scan_err("no_loader", "./main.js").await;
  let message = err.to_string();

  let logo = fixture("no_loader").join("logo.xyz");
  assert!(message.contains(&format!("\"{}\"", logo.display())));
  assert!(message.contains("main.js:1:1"));
}

#[tokio::test]
async fn dynamic_and_static_import_keep_separate_edges() {
  let bundler = scan("dynamic_static", "./main.js").await;
  let graph = bundler.graph();

  let main = find(graph, "main.js");
  let d = find(graph, "d.js");
  let references = graph.references(main);
  assert_eq!(references.len(), 2);
  assert!(references.iter().all(|reference| reference.target == d));

  assert_eq!(references[0].metadata.kind, ImportKind::Import);
  assert!(!references[0].metadata.is_dynamic());
  assert_eq!(references[1].metadata.kind, ImportKind::DynamicImport);
  assert!(references[1].metadata.is_dynamic());

  let first = references[0].metadata.location.as_ref().unwrap();
  let second = references[1].metadata.location.as_ref().unwrap();
  assert_eq!((first.line, second.line), (1, 3));
}

#[tokio::test]
async fn builtin_modules_are_synthesized_once() {
  let bundler = scan("builtin", "./main.js").await;
  let graph = bundler.graph();

  assert_eq!(graph.len(), 3);
  let fs = graph.asset_idx("node:fs").unwrap();
  assert_eq!(edges_into(graph, fs), 2);
  assert!(graph.asset(fs).content.contains("$$module.exports = require(\"node:fs\");"));
  assert!(graph.asset_idx("node:path").is_some());

  let main = graph.asset(find(graph, "main.js"));
  assert!(main.content.contains("[\"node:fs\", \"node:path\", \"node:fs\"]"));
}

#[tokio::test]
async fn invalid_json_aborts_the_build() {
  let err = scan_err("invalid_json", "./main.js").await;
  let message = err.to_string();
  assert!(message.starts_with("Invalid JSON in \""));
  assert!(message.contains("broken.json"));
}

#[tokio::test]
async fn missing_input_is_an_error() {
  let mut bundler = Bundler::new(BundlerOptions {
    cwd: Some(fixture("diamond")),
    ..Default::default()
  })
  .unwrap();
  assert!(bundler.scan().await.is_err());
}

#[tokio::test]
async fn unresolved_import_aborts_the_build() {
  let err = scan_err("diamond", "./missing.js").await;
  assert!(err.to_string().contains("Could not resolve \"./missing.js\""));
}

#[tokio::test]
async fn writes_runtime_and_registrations() {
  let out_dir = std::env::temp_dir().join(format!("packlet-assets-{}", std::process::id()));
  let mut bundler = Bundler::new(BundlerOptions {
    input: Some(vec!["./main.js".into()]),
    cwd: Some(fixture("assets")),
    dir: Some(out_dir.to_string_lossy().into_owned()),
    ..Default::default()
  })
  .unwrap();
  bundler.add_default_loaders().unwrap();

  let output = bundler.write().await.unwrap();
  assert!(output.warnings.is_empty());
  assert_eq!(output.assets.len(), 1);
  assert_eq!(output.assets[0].filename.as_str(), "dist.js");

  let written = std::fs::read_to_string(out_dir.join("dist.js")).unwrap();
  assert_eq!(written, output.assets[0].content);
  assert!(written.starts_with(packlet_runtime_prefix()));
  assert_eq!(written.matches(MODULE_SEPARATOR.as_str()).count(), 4);
  assert!(written.contains(
    "$$register(\"main.js\", [\"data.json\", \"style.css\"], function($$module, data_0, style_1) {"
  ));
  assert!(written.contains(
    "$$register(\"data.json\", [], function($$module) {\n$$module.exports = { \"name\": \"packlet\" };\n});"
  ));
  assert!(written.contains("$$module.exports.default = \"body { color: red; }\\n\";"));

  std::fs::remove_dir_all(out_dir).unwrap();
}

fn packlet_runtime_prefix() -> &'static str {
  "var process = globalThis.process"
}

async fn node_available() -> bool {
  tokio::process::Command::new("node")
    .arg("--version")
    .output()
    .await
    .is_ok_and(|output| output.status.success())
}

#[tokio::test]
async fn emitted_bundle_runs_under_node() {
  if !node_available().await {
    eprintln!("node is not on PATH, skipping");
    return;
  }

  let out_dir = std::env::temp_dir().join(format!("packlet-run-{}", std::process::id()));
  let mut bundler = Bundler::new(BundlerOptions {
    input: Some(vec!["./main.js".into()]),
    cwd: Some(fixture("run")),
    dir: Some(out_dir.to_string_lossy().into_owned()),
    ..Default::default()
  })
  .unwrap();
  bundler.add_default_loaders().unwrap();
  bundler.write().await.unwrap();

  let output =
    tokio::process::Command::new("node").arg(out_dir.join("dist.js")).output().await.unwrap();
  std::fs::remove_dir_all(&out_dir).unwrap();
  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

  let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(
    printed,
    serde_json::json!({
      "b": 1,
      "libIsOwnDefault": true,
      "read": "read",
      "early": "hoisted",
      "answer": 42,
      "shape": "shape",
      "count": 1,
      "lazy": "lazy",
    })
  );
}
