//! In-memory configuration session.
//!
//! A session owns a set of known extensions and tracks which of them are
//! active, in activation order, plus the values assigned by the user. Every
//! activation and every assignment is validated against the active
//! extensions' demands.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use ext_model::{Extension, OptionSpec, OptionValue};
use ext_resolver::ExtensionDependencySolver;

use crate::engine::is_value_permitted;
use crate::error::{Error, Result};
use crate::order::{find_spec, is_valid_extension_config_order};
use crate::verdict::{OrderVerdict, PermissionVerdict};

/// Serializable state of a session, for the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Active extensions in activation order.
    pub load_order: Vec<String>,
    /// Resolved value of every option published by an active extension, plus
    /// every user-assigned value.
    pub values: BTreeMap<String, OptionValue>,
}

/// Activation state and option values over a fixed set of extensions.
#[derive(Debug, Clone)]
pub struct ConfigSession {
    extensions: Vec<Extension>,
    active: Vec<String>,
    values: BTreeMap<String, OptionValue>,
}

impl ConfigSession {
    /// Start a session with no active extension.
    ///
    /// # Errors
    ///
    /// Fails when two extensions share a name or a dependency statement is
    /// malformed.
    pub fn new(extensions: Vec<Extension>) -> Result<Self> {
        ExtensionDependencySolver::new(&extensions)?;
        Ok(Self {
            extensions,
            active: Vec::new(),
            values: BTreeMap::new(),
        })
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn extension(&self, name: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.name == name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|n| n == name)
    }

    /// Names of the active extensions, in activation order.
    pub fn load_order(&self) -> &[String] {
        &self.active
    }

    /// The active extensions, in activation order.
    pub fn active_extensions(&self) -> Vec<&Extension> {
        self.active
            .iter()
            .filter_map(|name| self.extension(name))
            .collect()
    }

    /// Activate `name` if its demands agree with the active extensions.
    ///
    /// The verdict is returned either way; the extension only becomes active
    /// when it is `OK`.
    pub fn activate(&mut self, name: &str) -> Result<OrderVerdict> {
        if self.is_active(name) {
            return Err(Error::AlreadyActive(name.to_string()));
        }
        let candidate = self
            .extension(name)
            .ok_or_else(|| Error::UnknownExtension(name.to_string()))?;

        let verdict = is_valid_extension_config_order(&self.active_extensions(), candidate)?;
        if verdict.is_ok() {
            tracing::info!(extension = name, "activated extension");
            self.active.push(name.to_string());
        } else {
            tracing::info!(
                extension = name,
                conflicts = verdict.conflicts.len(),
                "activation refused"
            );
        }
        Ok(verdict)
    }

    /// Activate `name` together with everything it depends on, dependencies
    /// first.
    ///
    /// Already active extensions and virtual dependencies are skipped. Stops
    /// at the first refused activation and returns its verdict; extensions
    /// activated before that stay active.
    pub fn activate_with_dependencies(&mut self, name: &str) -> Result<OrderVerdict> {
        if self.is_active(name) {
            return Err(Error::AlreadyActive(name.to_string()));
        }
        if self.extension(name).is_none() {
            return Err(Error::UnknownExtension(name.to_string()));
        }

        let plan: Vec<String> = {
            let solver = ExtensionDependencySolver::new(&self.extensions)?;
            solver
                .dependencies_for(name)?
                .into_iter()
                .flatten()
                .filter(|n| solver.graph().is_extension(n))
                .collect()
        };
        tracing::debug!(extension = name, ?plan, "activating with dependencies");

        for step in plan {
            if self.is_active(&step) {
                continue;
            }
            let verdict = self.activate(&step)?;
            if !verdict.is_ok() {
                return Ok(verdict);
            }
        }
        Ok(OrderVerdict::ok())
    }

    /// Deactivate `name` and every active extension that depends on it,
    /// directly or not.
    ///
    /// Returns the deactivated names in former activation order; empty when
    /// `name` was not active.
    pub fn deactivate(&mut self, name: &str) -> Result<Vec<String>> {
        if self.extension(name).is_none() {
            return Err(Error::UnknownExtension(name.to_string()));
        }
        if !self.is_active(name) {
            return Ok(Vec::new());
        }

        let mut doomed: HashSet<String> = {
            let solver = ExtensionDependencySolver::new(&self.extensions)?;
            solver.reverse_dependencies_closure(name).into_iter().collect()
        };
        doomed.insert(name.to_string());

        let (removed, kept): (Vec<String>, Vec<String>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|n| doomed.contains(n));
        self.active = kept;

        tracing::info!(extension = name, ?removed, "deactivated extensions");
        Ok(removed)
    }

    /// The spec of `url`: the extension named by the url's leading segment
    /// first, then any known extension.
    pub fn spec(&self, url: &str) -> Option<&OptionSpec> {
        find_spec(url, &self.extensions)
    }

    fn require_spec(&self, url: &str) -> Result<&OptionSpec> {
        self.spec(url)
            .ok_or_else(|| Error::UnknownOption(url.to_string()))
    }

    /// The current value of `url`.
    ///
    /// A user-assigned value wins, then the first active extension that
    /// demands a concrete value, then the spec default.
    pub fn value(&self, url: &str) -> Result<OptionValue> {
        let spec = self.require_spec(url)?;
        if let Some(value) = self.values.get(url) {
            return Ok(value.clone());
        }
        let demanded = self
            .active_extensions()
            .into_iter()
            .filter_map(|ext| ext.demand(url))
            .find_map(|demand| demand.preferred_value(spec.option_type));
        Ok(demanded.unwrap_or_else(|| spec.default_value()))
    }

    /// Classify `value` for `url` against the active extensions without
    /// assigning it.
    pub fn check_value(&self, url: &str, value: &OptionValue) -> Result<PermissionVerdict> {
        let spec = self.require_spec(url)?;
        Ok(is_value_permitted(value, spec, &self.active_extensions()))
    }

    /// Assign `value` to `url` without checking it.
    pub fn set_value(&mut self, url: &str, value: OptionValue) -> Result<()> {
        self.require_spec(url)?;
        self.values.insert(url.to_string(), value);
        Ok(())
    }

    /// Assign `value` to `url` only when it is permitted.
    pub fn try_set_value(&mut self, url: &str, value: OptionValue) -> Result<PermissionVerdict> {
        let verdict = self.check_value(url, &value)?;
        if verdict.is_ok() {
            self.values.insert(url.to_string(), value);
        } else {
            tracing::debug!(url, status = %verdict.status, "value assignment refused");
        }
        Ok(verdict)
    }

    /// Forget the user-assigned value of `url`, if any.
    pub fn clear_value(&mut self, url: &str) -> Option<OptionValue> {
        self.values.remove(url)
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        let mut values = BTreeMap::new();
        for ext in self.active_extensions() {
            for url in ext.option_entries.keys() {
                values.insert(url.clone(), self.value(url)?);
            }
        }
        for (url, value) in &self.values {
            values.insert(url.clone(), value.clone());
        }
        Ok(SessionSnapshot {
            load_order: self.active.clone(),
            values,
        })
    }
}
