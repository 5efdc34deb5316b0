//! Dependency resolution for extensions.
//!
//! Extensions declare dependencies as statements such as `"base >= 1.0.0"`.
//! This crate parses those statements, builds a dependency graph from an
//! extension set and orders it into activation layers: every extension's
//! dependencies lie in a strictly earlier layer, and each layer is sorted.
//!
//! Version operators are carried through untouched. Picking among installed
//! versions is left to the caller.

pub mod error;
pub mod graph;
pub mod solver;
pub mod statement;

pub use error::{Error, Result};
pub use graph::{DependencyGraph, GraphNode, NodeKind, alphabetical};
pub use solver::ExtensionDependencySolver;
pub use statement::{DependencyStatement, Operator};
