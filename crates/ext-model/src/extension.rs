use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::demand::ConfigDemand;
use crate::option::OptionSpec;

/// A discovered extension.
///
/// Extensions are immutable once discovered; the resolver and the
/// permission engine only ever borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    pub version: String,
    /// Dependency statements, e.g. `"base >= 1.0.0"` or just `"base"`.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Demands this extension places on options, keyed by option url.
    #[serde(default)]
    pub config_entries: BTreeMap<String, ConfigDemand>,
    /// Options this extension publishes, keyed by url.
    #[serde(default)]
    pub option_entries: BTreeMap<String, OptionSpec>,
}

impl Extension {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: Vec::new(),
            config_entries: BTreeMap::new(),
            option_entries: BTreeMap::new(),
        }
    }

    pub fn with_dependency(mut self, statement: impl Into<String>) -> Self {
        self.dependencies.push(statement.into());
        self
    }

    pub fn with_option(mut self, spec: OptionSpec) -> Self {
        self.option_entries.insert(spec.url.clone(), spec);
        self
    }

    pub fn with_demand(mut self, url: impl Into<String>, demand: ConfigDemand) -> Self {
        self.config_entries.insert(url.into(), demand);
        self
    }

    /// The spec of an option this extension publishes.
    pub fn option(&self, url: &str) -> Option<&OptionSpec> {
        self.option_entries.get(url)
    }

    /// This extension's demand on `url`, if it declares one.
    pub fn demand(&self, url: &str) -> Option<&ConfigDemand> {
        self.config_entries.get(url)
    }
}
