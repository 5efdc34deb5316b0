//! Data model for the extension manager.
//!
//! This crate defines the records every other crate works on: extensions,
//! the option specs they publish, the configuration demands they place on
//! each other's options, and the dynamically typed values those options hold.
//! It also loads whole extension sets from manifest files.

pub mod demand;
pub mod error;
pub mod extension;
pub mod manifest;
pub mod option;
pub mod value;

pub use demand::{ConfigDemand, DemandTerms};
pub use error::{Error, Result};
pub use extension::Extension;
pub use manifest::{ConfigNode, ExtensionManifest, ManifestSet};
pub use option::{OptionSpec, OptionType, RangeViolation, ValueRange, ValueSpec};
pub use value::OptionValue;
