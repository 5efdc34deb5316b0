/// Errors raised by the permission engine, the order validator and
/// configuration sessions.
///
/// Rejected values and conflicting demands are not errors; they come back as
/// verdicts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No extension of the set publishes an option under this url.
    #[error("spec not found for '{url}'")]
    SpecNotFound { url: String },

    /// Extension not part of the session.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),

    /// No known extension publishes an option under this url.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// The extension is already active in the session.
    #[error("extension already active: {0}")]
    AlreadyActive(String),

    #[error(transparent)]
    Resolver(#[from] ext_resolver::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
