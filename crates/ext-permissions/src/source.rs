//! Where the engine reads configuration demands from.

use std::collections::BTreeMap;

use ext_model::{ConfigDemand, Extension};

/// A named provider of configuration demands.
///
/// The engine only needs a name for verdicts and a lookup by option url, so
/// checks run against extensions, borrowed extensions or derived views such
/// as [`NamedDemands::required_only`] alike.
pub trait DemandSource {
    /// Name reported as `by` when one of this source's demands is violated.
    fn source_name(&self) -> &str;

    /// The demand this source places on `url`, if any.
    fn demand_for(&self, url: &str) -> Option<&ConfigDemand>;
}

impl DemandSource for Extension {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn demand_for(&self, url: &str) -> Option<&ConfigDemand> {
        self.demand(url)
    }
}

impl<T: DemandSource + ?Sized> DemandSource for &T {
    fn source_name(&self) -> &str {
        (**self).source_name()
    }

    fn demand_for(&self, url: &str) -> Option<&ConfigDemand> {
        (**self).demand_for(url)
    }
}

/// An owned, named map of demands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedDemands {
    name: String,
    demands: BTreeMap<String, ConfigDemand>,
}

impl NamedDemands {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            demands: BTreeMap::new(),
        }
    }

    pub fn with_demand(mut self, url: impl Into<String>, demand: ConfigDemand) -> Self {
        self.demands.insert(url.into(), demand);
        self
    }

    /// The hard (`required-*`) part of `extension`'s demands.
    ///
    /// Demands without any hard term are left out.
    pub fn required_only(extension: &Extension) -> Self {
        let demands = extension
            .config_entries
            .iter()
            .filter(|(_, demand)| demand.has_required_terms())
            .map(|(url, demand)| (url.clone(), demand.required_only()))
            .collect();
        Self {
            name: extension.name.clone(),
            demands,
        }
    }
}

impl DemandSource for NamedDemands {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn demand_for(&self, url: &str) -> Option<&ConfigDemand> {
        self.demands.get(url)
    }
}
