//! Shared test utilities for the extension-manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`builders`]: fluent [`ExtensionBuilder`] for in-memory extension sets
//! - [`manifest`]: [`TestManifest`], a manifest set written to a temp dir

pub mod builders;
pub mod manifest;

pub use builders::{ExtensionBuilder, extension};
pub use manifest::TestManifest;
