use std::path::PathBuf;

/// Errors that can occur while building or loading the extension model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to parse an extension manifest written in TOML.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    /// Failed to parse an extension manifest written in YAML.
    #[error("failed to parse YAML extension manifest: {0}")]
    ManifestYaml(#[from] serde_yaml::Error),

    /// Failed to parse an extension manifest written in JSON.
    #[error("failed to parse JSON extension manifest: {0}")]
    ManifestJson(#[from] serde_json::Error),

    /// Manifest file not found at the expected path.
    #[error("extension manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// The manifest file extension does not name a supported format.
    #[error("unsupported manifest format: {path} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// I/O error reading a manifest.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid extension name.
    #[error("invalid extension name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Invalid semver version string.
    #[error("invalid version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    /// An option declared a `type` outside the closed set of option types.
    #[error("unrecognized type: {0}")]
    UnrecognizedType(String),

    /// Two options or two demands of one extension resolve to the same url.
    #[error("url already has a value: {url} (in extension '{extension}')")]
    DuplicateUrl { url: String, extension: String },

    /// The same extension name appears twice in one set.
    #[error("extension already loaded: {0}")]
    DuplicateExtension(String),
}

pub type Result<T> = std::result::Result<T, Error>;
