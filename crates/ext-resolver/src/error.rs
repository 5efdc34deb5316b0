/// Errors that can occur while parsing dependency statements or solving an
/// extension set.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No extension name could be extracted from a dependency statement.
    #[error("malformed dependency statement: '{0}'")]
    MalformedDependency(String),

    /// The dependency graph contains a cycle. `participants` names the
    /// extensions on a cycle; extensions that only depend on one are left out.
    #[error("dependency cycle detected among: {}", .participants.join(", "))]
    CyclicDependency { participants: Vec<String> },

    /// The named extension is not part of the solved set.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),

    /// The same extension name was handed to the solver twice.
    #[error("extension already loaded: {0}")]
    DuplicateExtension(String),
}

pub type Result<T> = std::result::Result<T, Error>;
