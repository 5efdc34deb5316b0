//! Layered activation ordering for an extension set.

use std::collections::BTreeSet;

use ext_model::Extension;

use crate::error::{Error, Result};
use crate::graph::{DependencyGraph, NodeKind, alphabetical};

/// Computes activation layers, dependency closures and reverse dependencies
/// for a set of extensions.
///
/// The solver borrows the extensions and builds its graph once, at
/// construction. Build a new solver whenever the set changes.
#[derive(Debug, Clone)]
pub struct ExtensionDependencySolver<'a> {
    extensions: Vec<&'a Extension>,
    graph: DependencyGraph,
}

impl<'a> ExtensionDependencySolver<'a> {
    /// Build a solver over `extensions`.
    ///
    /// # Errors
    ///
    /// Fails on a malformed dependency statement or a duplicate extension
    /// name.
    pub fn new(extensions: impl IntoIterator<Item = &'a Extension>) -> Result<Self> {
        let extensions: Vec<&'a Extension> = extensions.into_iter().collect();
        let graph = DependencyGraph::from_extensions(extensions.iter().copied())?;
        tracing::debug!(
            extensions = extensions.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built dependency graph"
        );
        Ok(Self { extensions, graph })
    }

    pub fn extensions(&self) -> &[&'a Extension] {
        &self.extensions
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Activation layers of the whole set, virtual dependencies included.
    pub fn solve(&self) -> Result<Vec<Vec<String>>> {
        self.graph.layers()
    }

    /// [`solve`](Self::solve) with virtual dependencies removed and emptied
    /// layers dropped.
    pub fn solve_extensions_only(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.without_virtual(self.solve()?))
    }

    /// Extension names in a valid activation order, dependencies first.
    pub fn activation_order(&self) -> Result<Vec<String>> {
        Ok(self.solve_extensions_only()?.into_iter().flatten().collect())
    }

    /// Names depended upon that are not extensions of the set, sorted.
    pub fn virtual_dependencies(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .graph
            .nodes()
            .iter()
            .filter(|node| node.kind == NodeKind::Virtual)
            .map(|node| node.name.clone())
            .collect();
        names.sort_by(|a, b| alphabetical(a, b));
        names
    }

    /// Extensions that directly depend on `name`, in input order.
    pub fn reverse_dependencies_for(&self, name: &str) -> Vec<String> {
        self.extensions
            .iter()
            .filter(|ext| self.graph.dependencies_of(&ext.name).contains(&name))
            .map(|ext| ext.name.clone())
            .collect()
    }

    /// Every extension that transitively depends on `name`, sorted.
    ///
    /// These are the extensions that stop working when `name` is removed.
    pub fn reverse_dependencies_closure(&self, name: &str) -> Vec<String> {
        let mut found: BTreeSet<String> = BTreeSet::new();
        let mut worklist = vec![name.to_string()];

        while let Some(current) = worklist.pop() {
            for dependent in self.reverse_dependencies_for(&current) {
                if dependent != name && found.insert(dependent.clone()) {
                    worklist.push(dependent);
                }
            }
        }

        found.into_iter().collect()
    }

    /// Activation layers of `name` and everything it transitively depends on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownExtension`] if `name` is not an extension of
    /// the set, or [`Error::CyclicDependency`] if the closure has a cycle.
    pub fn dependencies_for(&self, name: &str) -> Result<Vec<Vec<String>>> {
        self.dependencies_for_all([name])
    }

    /// Activation layers of several extensions and their dependencies, solved
    /// together.
    pub fn dependencies_for_all<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Result<Vec<Vec<String>>> {
        let mut roots = Vec::new();
        for name in names {
            match self.graph.index_of(name) {
                Some(idx) if self.graph.nodes()[idx].kind == NodeKind::Extension => {
                    roots.push(idx)
                }
                _ => return Err(Error::UnknownExtension(name.to_string())),
            }
        }

        let closure = self.graph.closure(&roots);
        tracing::debug!(
            roots = roots.len(),
            closure = closure.len(),
            "solving dependency closure"
        );
        self.graph.subgraph(&closure).layers()
    }

    fn without_virtual(&self, layers: Vec<Vec<String>>) -> Vec<Vec<String>> {
        layers
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .filter(|name| self.graph.is_extension(name))
                    .collect::<Vec<_>>()
            })
            .filter(|layer| !layer.is_empty())
            .collect()
    }
}
