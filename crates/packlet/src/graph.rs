use arcstr::ArcStr;
use oxc_index::IndexVec;
use packlet_common::{Asset, AssetIdx, AssetReference, ReferenceMetadata};
use packlet_utils::indexmap::{FxIndexMap, FxIndexSet};
use rustc_hash::{FxHashMap, FxHashSet};

/// Every asset discovered during one build and the edges between them.
#[derive(Debug, Default)]
pub struct Graph {
  assets: IndexVec<AssetIdx, Asset>,
  path_index: FxHashMap<ArcStr, AssetIdx>,
  /// Outgoing edges per asset, in discovery order.
  references: IndexVec<AssetIdx, Vec<AssetReference>>,
  entries: FxIndexSet<AssetIdx>,
}

/// `{ references, size, subtree_size }` per asset, keyed by path.
pub type DependencyTree = FxIndexMap<ArcStr, DependencyNode>;

#[derive(Debug, Default)]
pub struct DependencyNode {
  pub references: DependencyTree,
  pub size: usize,
  /// Sum of `size` over every node below this one.
  pub subtree_size: usize,
}

impl Graph {
  /// Inserting a path that is already known returns the existing asset untouched.
  pub fn add_asset(&mut self, asset: Asset) -> AssetIdx {
    if let Some(idx) = self.path_index.get(&asset.path) {
      return *idx;
    }
    let path = asset.path.clone();
    let idx = self.assets.push(asset);
    self.references.push(Vec::new());
    self.path_index.insert(path, idx);
    idx
  }

  pub fn add_entry(&mut self, idx: AssetIdx) {
    self.entries.insert(idx);
  }

  /// Edges are never merged, two call sites importing the same asset keep two edges.
  pub fn add_asset_reference(&mut self, from: AssetIdx, to: AssetIdx, metadata: ReferenceMetadata) {
    self.references[from].push(AssetReference::new(to, metadata));
  }

  pub fn update_content(&mut self, idx: AssetIdx, content: String) {
    self.assets[idx].content = content;
  }

  pub fn asset_idx(&self, path: &str) -> Option<AssetIdx> {
    self.path_index.get(path).copied()
  }

  pub fn asset(&self, idx: AssetIdx) -> &Asset {
    &self.assets[idx]
  }

  pub fn assets(&self) -> impl Iterator<Item = (AssetIdx, &Asset)> {
    self.assets.iter_enumerated()
  }

  pub fn len(&self) -> usize {
    self.assets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }

  pub fn references(&self, idx: AssetIdx) -> &[AssetReference] {
    &self.references[idx]
  }

  pub fn entries(&self) -> impl Iterator<Item = AssetIdx> + '_ {
    self.entries.iter().copied()
  }

  /// Builds the dependency tree below `roots`, the entries by default.
  ///
  /// An edge leading back to an asset that is already on the current path is left out, so a
  /// cyclic graph still produces a finite tree.
  pub fn compute_dependency_tree(&self, roots: Option<&[AssetIdx]>) -> DependencyTree {
    let roots = roots.map_or_else(|| self.entries().collect(), <[AssetIdx]>::to_vec);
    let mut ancestors = FxHashSet::default();
    let mut tree = DependencyTree::default();
    for root in roots {
      let node = self.dependency_node(root, &mut ancestors);
      tree.insert(self.assets[root].path.clone(), node);
    }
    tree
  }

  fn dependency_node(&self, idx: AssetIdx, ancestors: &mut FxHashSet<AssetIdx>) -> DependencyNode {
    ancestors.insert(idx);

    let mut references = DependencyTree::default();
    for reference in &self.references[idx] {
      if ancestors.contains(&reference.target) {
        continue;
      }
      let child = self.dependency_node(reference.target, ancestors);
      references.insert(self.assets[reference.target].path.clone(), child);
    }

    ancestors.remove(&idx);

    let subtree_size = references.values().map(|child| child.size + child.subtree_size).sum();
    DependencyNode { references, size: self.assets[idx].size(), subtree_size }
  }
}

#[cfg(test)]
fn import_metadata() -> ReferenceMetadata {
  ReferenceMetadata::new(packlet_common::ImportKind::Import, None)
}

#[test]
fn test_add_asset_is_idempotent() {
  let mut graph = Graph::default();
  let first = graph.add_asset(Asset::new("/project/a.js", "first"));
  let second = graph.add_asset(Asset::new("/project/a.js", "second"));
  assert_eq!(first, second);
  assert_eq!(graph.len(), 1);
  assert_eq!(graph.asset(first).content, "first");
}

#[test]
fn test_diamond_keeps_both_edges() {
  let mut graph = Graph::default();
  let main = graph.add_asset(Asset::new("/main.js", "1234"));
  let b = graph.add_asset(Asset::new("/b.js", "12"));
  let c = graph.add_asset(Asset::new("/c.js", "123"));
  let d = graph.add_asset(Asset::new("/d.js", "1"));
  graph.add_entry(main);
  graph.add_asset_reference(main, b, import_metadata());
  graph.add_asset_reference(main, c, import_metadata());
  graph.add_asset_reference(b, d, import_metadata());
  graph.add_asset_reference(c, d, import_metadata());

  let edges_into_d = graph
    .assets()
    .flat_map(|(idx, _)| graph.references(idx))
    .filter(|reference| reference.target == d)
    .count();
  assert_eq!(edges_into_d, 2);

  let tree = graph.compute_dependency_tree(None);
  let root = &tree["/main.js"];
  assert_eq!(root.size, 4);
  // b (2) + d (1) + c (3) + d (1)
  assert_eq!(root.subtree_size, 7);
  assert_eq!(root.references["/b.js"].subtree_size, 1);
}

#[test]
fn test_dependency_tree_breaks_cycles() {
  let mut graph = Graph::default();
  let a = graph.add_asset(Asset::new("/a.js", "aa"));
  let b = graph.add_asset(Asset::new("/b.js", "bbb"));
  graph.add_entry(a);
  graph.add_asset_reference(a, b, import_metadata());
  graph.add_asset_reference(b, a, import_metadata());

  let tree = graph.compute_dependency_tree(None);
  let root = &tree["/a.js"];
  assert_eq!(root.subtree_size, 3);
  assert!(root.references["/b.js"].references.is_empty());

  let tree = graph.compute_dependency_tree(Some(&[b]));
  assert_eq!(tree["/b.js"].subtree_size, 2);
}
