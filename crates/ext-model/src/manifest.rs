//! Manifest sets: a file describing a whole set of extensions.
//!
//! Discovery normally hands extensions over already parsed; the manifest set
//! format lets tools and tests describe a set in one file. TOML is the
//! canonical format, YAML and JSON are accepted by file extension.
//!
//! # Example TOML
//!
//! ```toml
//! [[extension]]
//! name = "mod1"
//! version = "1.0.0"
//! dependencies = { framework = ">= 3.0.0" }
//!
//! [[extension.options]]
//! url = "mod1.feature1"
//! type = "number"
//! value = { default = 20, range = { min = 0, max = 100 } }
//!
//! [[extension]]
//! name = "mod2"
//! version = "0.2.0"
//! dependencies = ["mod1 >= 1.0.0"]
//!
//! [extension.config.mod1.feature1.value]
//! required-value = 30
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::demand::ConfigDemand;
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::option::OptionSpec;

/// A set of extension manifests, in declaration order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ManifestSet {
    #[serde(default, rename = "extension", alias = "extensions")]
    pub extensions: Vec<ExtensionManifest>,
}

/// One extension as written in a manifest set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionManifest {
    /// Extension name (alphanumerics, `-` and `_`).
    pub name: String,
    /// Semver version string.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Either a list of statements or a `name = "range"` table.
    #[serde(default, deserialize_with = "deserialize_dependencies")]
    pub dependencies: Vec<String>,
    /// Options published by the extension.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    /// Demands on options, possibly nested by url segment.
    #[serde(default)]
    pub config: BTreeMap<String, ConfigNode>,
}

/// A node of the nested `config` tree.
///
/// A table with a `value` key is a demand; any other table is a branch whose
/// keys are further url segments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    Demand(ConfigDemand),
    Branch(BTreeMap<String, ConfigNode>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DependencyDecl {
    List(Vec<String>),
    Table(BTreeMap<String, String>),
}

fn deserialize_dependencies<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match DependencyDecl::deserialize(deserializer)? {
        DependencyDecl::List(statements) => statements,
        DependencyDecl::Table(table) => table
            .into_iter()
            .map(|(name, range)| {
                let range = range.trim();
                if range.is_empty() || range == "*" {
                    name
                } else {
                    format!("{name} {range}")
                }
            })
            .collect(),
    })
}

impl ManifestSet {
    /// Parse a manifest set from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a manifest set from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a manifest set from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a manifest set, picking the format from the file
    /// extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ManifestNotFound(path.to_path_buf()));
        }
        let parse: fn(&str) -> Result<Self> = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml,
            Some("yaml" | "yml") => Self::from_yaml,
            Some("json") => Self::from_json,
            _ => {
                return Err(Error::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };
        let content = std::fs::read_to_string(path)?;
        let set = parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            extensions = set.extensions.len(),
            "loaded manifest set"
        );
        Ok(set)
    }

    /// Serialize the set back to a TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate every manifest and convert the set into extensions.
    ///
    /// Fails on the first invalid manifest, or when two manifests share a
    /// name.
    pub fn into_extensions(self) -> Result<Vec<Extension>> {
        let mut seen = std::collections::HashSet::new();
        let mut extensions = Vec::with_capacity(self.extensions.len());
        for manifest in self.extensions {
            if !seen.insert(manifest.name.clone()) {
                return Err(Error::DuplicateExtension(manifest.name));
            }
            extensions.push(manifest.into_extension()?);
        }
        Ok(extensions)
    }
}

impl ExtensionManifest {
    /// Validate the manifest and convert it into an [`Extension`].
    ///
    /// Option urls are prefixed with the extension name when they do not
    /// already start with it, and the nested `config` tree is flattened to
    /// dotted urls.
    pub fn into_extension(self) -> Result<Extension> {
        self.validate()?;

        let prefix = format!("{}.", self.name);
        let mut option_entries = BTreeMap::new();
        for mut spec in self.options {
            if !spec.url.starts_with(&prefix) {
                spec.url = format!("{prefix}{}", spec.url);
            }
            match option_entries.entry(spec.url.clone()) {
                Entry::Occupied(_) => {
                    return Err(Error::DuplicateUrl {
                        url: spec.url,
                        extension: self.name,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(spec);
                }
            }
        }

        let mut config_entries = BTreeMap::new();
        for (key, node) in self.config {
            collect_demands(&mut config_entries, key, node, &self.name)?;
        }

        Ok(Extension {
            name: self.name,
            version: self.version,
            dependencies: self.dependencies,
            config_entries,
            option_entries,
        })
    }

    fn validate(&self) -> Result<()> {
        let name = &self.name;
        if name.is_empty() {
            return Err(Error::InvalidName {
                name: name.clone(),
                reason: "extension name must not be empty".to_string(),
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidName {
                name: name.clone(),
                reason: "extension name must contain only alphanumeric characters, hyphens, or underscores".to_string(),
            });
        }

        semver::Version::parse(&self.version).map_err(|e| Error::InvalidVersion {
            version: self.version.clone(),
            source: e,
        })?;

        Ok(())
    }
}

/// Flatten one `config` node into `collection`, joining nested keys with `.`.
fn collect_demands(
    collection: &mut BTreeMap<String, ConfigDemand>,
    url: String,
    node: ConfigNode,
    extension: &str,
) -> Result<()> {
    match node {
        ConfigNode::Demand(demand) => match collection.entry(url) {
            Entry::Occupied(slot) => Err(Error::DuplicateUrl {
                url: slot.key().clone(),
                extension: extension.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(demand);
                Ok(())
            }
        },
        ConfigNode::Branch(children) => {
            for (key, child) in children {
                collect_demands(collection, format!("{url}.{key}"), child, extension)?;
            }
            Ok(())
        }
    }
}
