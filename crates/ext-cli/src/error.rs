//! Error types for ext-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error loading the manifest set
    #[error(transparent)]
    Model(#[from] ext_model::Error),

    /// Error from dependency resolution
    #[error(transparent)]
    Resolver(#[from] ext_resolver::Error),

    /// Error from the permission engine or a session
    #[error(transparent)]
    Permissions(#[from] ext_permissions::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The checked configuration has conflicts
    #[error("{count} configuration conflict(s) found")]
    Conflicts { count: usize },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
