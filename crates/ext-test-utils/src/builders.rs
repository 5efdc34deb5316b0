//! Fluent builders for extensions used across test suites.

use ext_model::{ConfigDemand, Extension, OptionSpec, OptionValue};

/// Start building an extension named `name` at version `1.0.0`.
///
/// ```
/// use ext_model::OptionSpec;
/// use ext_test_utils::extension;
///
/// let ext = extension("mod1")
///     .depends_on("framework >= 3.0.0")
///     .option(OptionSpec::number("mod1.feature1", 20.0))
///     .requires("mod1.feature1", 30)
///     .build();
/// assert_eq!(ext.dependencies, vec!["framework >= 3.0.0"]);
/// ```
pub fn extension(name: impl Into<String>) -> ExtensionBuilder {
    ExtensionBuilder {
        extension: Extension::new(name, "1.0.0"),
    }
}

/// Builder returned by [`extension`].
#[derive(Debug, Clone)]
pub struct ExtensionBuilder {
    extension: Extension,
}

impl ExtensionBuilder {
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.extension.version = version.into();
        self
    }

    /// Add a dependency statement.
    pub fn depends_on(mut self, statement: impl Into<String>) -> Self {
        self.extension.dependencies.push(statement.into());
        self
    }

    /// Publish an option.
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.extension = self.extension.with_option(spec);
        self
    }

    /// Place an arbitrary demand on `url`.
    pub fn demand(mut self, url: impl Into<String>, demand: ConfigDemand) -> Self {
        self.extension = self.extension.with_demand(url, demand);
        self
    }

    /// Shortcut for a demand with only a `required-value`.
    pub fn requires(self, url: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.demand(url, ConfigDemand::required_value(value))
    }

    /// Shortcut for a demand with only a `suggested-value`.
    pub fn suggests(self, url: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.demand(url, ConfigDemand::suggested_value(value))
    }

    pub fn build(self) -> Extension {
        self.extension
    }
}
