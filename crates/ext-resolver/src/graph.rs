//! Dependency graph snapshot of an extension set.
//!
//! Nodes live in an arena and refer to each other by index. Edges point from
//! dependent to dependency: if A depends on B, B is listed among A's
//! dependencies. Names referenced by a dependency statement without being an
//! extension of the set become [`NodeKind::Virtual`] nodes; they have no
//! dependencies of their own and are always satisfied.
//!
//! # Example
//!
//! ```
//! use ext_model::Extension;
//! use ext_resolver::graph::{DependencyGraph, NodeKind};
//!
//! let app = Extension::new("app", "1.0.0").with_dependency("framework >= 3.0.0");
//! let graph = DependencyGraph::from_extensions([&app]).unwrap();
//!
//! assert_eq!(graph.node("framework").unwrap().kind, NodeKind::Virtual);
//! assert_eq!(graph.layers().unwrap(), vec![vec!["framework"], vec!["app"]]);
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use ext_model::Extension;

use crate::error::{Error, Result};
use crate::statement::DependencyStatement;

/// Alphabetical order of extension names: case-insensitive, with byte order
/// breaking ties so the result stays total.
pub fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// The kind of node in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An extension of the set.
    Extension,
    /// A name that is depended upon but is not an extension of the set.
    Virtual,
}

/// A single node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub kind: NodeKind,
    /// Arena indices of the direct dependencies, without duplicates.
    pub dependencies: Vec<usize>,
}

/// Arena-backed dependency graph. Cheap to clone and rebuilt from scratch for
/// every extension set.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Create an empty dependency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph of an extension set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateExtension`] if two extensions share a name,
    /// or [`Error::MalformedDependency`] if a dependency statement has no
    /// extension name.
    pub fn from_extensions<'a>(extensions: impl IntoIterator<Item = &'a Extension>) -> Result<Self> {
        let extensions: Vec<&Extension> = extensions.into_iter().collect();
        let mut graph = Self::new();

        for extension in &extensions {
            if graph.index.contains_key(&extension.name) {
                return Err(Error::DuplicateExtension(extension.name.clone()));
            }
            graph.add_node(&extension.name, NodeKind::Extension);
        }

        for extension in &extensions {
            let from = graph.index[&extension.name];
            for raw in &extension.dependencies {
                let statement = DependencyStatement::parse(raw)?;
                let to = graph.add_node(&statement.extension, NodeKind::Virtual);
                graph.add_edge(from, to);
            }
        }

        Ok(graph)
    }

    /// Add a node, returning its index. An existing node of the same name is
    /// kept as is.
    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(GraphNode {
            name: name.to_string(),
            kind,
            dependencies: Vec::new(),
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Declare that node `from` depends on node `to`.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        let deps = &mut self.nodes[from].dependencies;
        if !deps.contains(&to) {
            deps.push(to);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.dependencies.len()).sum()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.index_of(name).map(|idx| &self.nodes[idx])
    }

    /// Whether `name` is an extension of the set (not a virtual node).
    pub fn is_extension(&self, name: &str) -> bool {
        self.node(name).is_some_and(|n| n.kind == NodeKind::Extension)
    }

    /// Names of the direct dependencies of `name`, in declaration order.
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.node(name)
            .map(|node| {
                node.dependencies
                    .iter()
                    .map(|&idx| self.nodes[idx].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names of the nodes that directly depend on `name`, in insertion order.
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        let Some(target) = self.index_of(name) else {
            return Vec::new();
        };
        self.nodes
            .iter()
            .filter(|node| node.dependencies.contains(&target))
            .map(|node| node.name.as_str())
            .collect()
    }

    /// Indices of `roots` and everything they transitively depend on.
    ///
    /// Worklist traversal with a visited set, so shared and cyclic
    /// dependencies are visited once. The result is sorted by index.
    pub fn closure(&self, roots: &[usize]) -> Vec<usize> {
        let mut visited: HashSet<usize> = roots.iter().copied().collect();
        let mut worklist: Vec<usize> = roots
            .iter()
            .flat_map(|&root| self.nodes[root].dependencies.iter().copied())
            .collect();

        while let Some(current) = worklist.pop() {
            if visited.insert(current) {
                worklist.extend(self.nodes[current].dependencies.iter().copied());
            }
        }

        let mut closure: Vec<usize> = visited.into_iter().collect();
        closure.sort_unstable();
        closure
    }

    /// The sub-graph induced by `members`: those nodes and the edges among
    /// them.
    pub fn subgraph(&self, members: &[usize]) -> Self {
        let mut graph = Self::new();
        for &idx in members {
            let node = &self.nodes[idx];
            graph.add_node(&node.name, node.kind);
        }
        for &idx in members {
            let from = graph.index[&self.nodes[idx].name];
            for &dep in &self.nodes[idx].dependencies {
                if let Some(to) = graph.index_of(&self.nodes[dep].name) {
                    graph.add_edge(from, to);
                }
            }
        }
        graph
    }

    /// Order the graph into activation layers.
    ///
    /// Each round emits the names that are depended upon but are not
    /// extensions, together with the extensions left without unsatisfied
    /// dependencies. Emitted names are then removed from every remaining
    /// dependency list. Layers are sorted with [`alphabetical`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicDependency`] when a round makes no progress,
    /// naming the extensions that lie on a cycle.
    pub fn layers(&self) -> Result<Vec<Vec<String>>> {
        let mut remaining: BTreeMap<&str, BTreeSet<&str>> = self
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Extension)
            .map(|node| {
                let deps = node
                    .dependencies
                    .iter()
                    .map(|&idx| self.nodes[idx].name.as_str())
                    .collect();
                (node.name.as_str(), deps)
            })
            .collect();

        let mut layers = Vec::new();
        while !remaining.is_empty() {
            let targets: BTreeSet<&str> = remaining.values().flatten().copied().collect();
            let unresolved_targets = targets
                .into_iter()
                .filter(|name| !remaining.contains_key(name));
            let free = remaining
                .iter()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(&name, _)| name);
            let layer: BTreeSet<&str> = unresolved_targets.chain(free).collect();

            if layer.is_empty() {
                let participants = on_cycle(&remaining);
                tracing::warn!(
                    ?participants,
                    unplaced = remaining.len(),
                    "dependency cycle detected"
                );
                return Err(Error::CyclicDependency { participants });
            }

            for deps in remaining.values_mut() {
                deps.retain(|dep| !layer.contains(dep));
            }
            remaining.retain(|name, _| !layer.contains(name));

            let mut emitted: Vec<String> = layer.into_iter().map(str::to_string).collect();
            emitted.sort_by(|a, b| alphabetical(a, b));
            tracing::debug!(round = layers.len(), layer = ?emitted, "emitted activation layer");
            layers.push(emitted);
        }

        Ok(layers)
    }
}

/// Names of `remaining` that can reach themselves through their
/// dependencies, sorted with [`alphabetical`].
fn on_cycle(remaining: &BTreeMap<&str, BTreeSet<&str>>) -> Vec<String> {
    let mut names: Vec<String> = remaining
        .keys()
        .filter(|&&start| {
            let mut visited: HashSet<&str> = HashSet::new();
            let mut worklist: Vec<&str> = remaining[start].iter().copied().collect();
            while let Some(current) = worklist.pop() {
                if current == start {
                    return true;
                }
                if visited.insert(current) {
                    if let Some(deps) = remaining.get(current) {
                        worklist.extend(deps.iter().copied());
                    }
                }
            }
            false
        })
        .map(|name| name.to_string())
        .collect();
    names.sort_by(|a, b| alphabetical(a, b));
    names
}
